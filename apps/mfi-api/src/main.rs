use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	let args = mfi_api::Args::parse();
	mfi_api::run(args).await
}
