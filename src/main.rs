use anyhow::Result;
use tokio::io::AsyncBufReadExt;

use shorecrew_ui::{command, Controller};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize core
    shorecrew_core::init()?;

    let (config, _validation) = shorecrew_core::Config::load_validated()?;
    tracing::info!("Shorecrew dashboard started");

    let mut controller = Controller::new(&config)?;
    controller.startup().await;

    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    prompt();
    while let Some(line) = lines.next_line().await? {
        match command::parse(&line) {
            Ok(cmd) => {
                if !controller.handle(cmd).await? {
                    break;
                }
            }
            Err(command::ParseError::Empty) => {}
            Err(e) => println!("{}", e),
        }
        prompt();
    }

    tracing::info!("Shorecrew dashboard shut down");
    Ok(())
}

fn prompt() {
    use std::io::Write as _;
    print!("shorecrew> ");
    let _ = std::io::stdout().flush();
}
