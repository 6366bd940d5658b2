use std::process::ExitCode;

use indoc::printdoc;
use l10nsheet::{Outcome, Settings, extract_to_sheet};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let settings = Settings::default();
    println!("🔍 Extracting translation keys...");

    match extract_to_sheet(&settings) {
        Ok(outcome) if !outcome.is_failure() => {
            let keys = outcome.key_count();
            println!("✅ {} keys found", keys);
            println!("✅ File written: {}", settings.output_path.display());
            println!("📊 Total keys: {}", keys);
            printdoc! {"

                📝 Next steps:
                1. Open '{output}' in Excel or Google Sheets
                2. Fill in the columns of the languages you want to translate
                3. Use the CSV as a reference to update {input}
                ",
                output = settings.output_path.display(),
                input = settings.input_path.display(),
            };
            ExitCode::SUCCESS
        }
        Ok(Outcome::BlockNotFound { locale }) => {
            eprintln!(
                "Error: could not find the '{}' block in {}",
                locale,
                settings.input_path.display()
            );
            println!("❌ No keys found. Check the file.");
            ExitCode::from(1)
        }
        Ok(Outcome::Written { path, .. }) => {
            println!("❌ No keys found. Check the file.");
            println!("   An empty sheet was written to {}", path.display());
            ExitCode::from(1)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(2)
        }
    }
}
