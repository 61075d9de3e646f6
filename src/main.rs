use anyhow::Result;
use clap::{error::ErrorKind, Parser};

use fanout_pipeline::{
    cli::{execute_run, Cli},
    logging::init_logging,
};

#[tokio::main]
async fn main() -> Result<()> {
    // 1. 引数解析 - 失敗時は使い方を標準出力へ出して終了コード1
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(error) if matches!(error.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            error.exit()
        }
        Err(error) => {
            println!("{}", error.render());
            println!("{}", Cli::usage());
            std::process::exit(1);
        }
    };

    init_logging(cli.verbose);

    // 2. 検証
    let settings = match cli.into_settings() {
        Ok(settings) => settings,
        Err(error) => {
            println!("Error: {error}");
            println!("{}", Cli::usage());
            std::process::exit(1);
        }
    };

    // 3. 実行
    if let Err(error) = execute_run(settings).await {
        eprintln!("❌ エラー: {error}");
        std::process::exit(1);
    }

    Ok(())
}
