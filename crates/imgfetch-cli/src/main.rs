use imgfetch_lib::cli::{parse_args, resolve_command, run_fetch};
use imgfetch_lib::error::ImgFetchError;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), ImgFetchError> {
    color_eyre::install()?;

    let args = parse_args();
    let params = resolve_command(args.command)?;

    // Per-URL outcomes are reported as they happen; they never change the exit code.
    run_fetch(params).await?;

    Ok(())
}
