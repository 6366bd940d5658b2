pub mod csv;
pub mod dart;

// Reexporting the formats for easier access
pub use self::csv::Format as SheetFormat;
pub use dart::Format as DartFormat;
