use anyhow::Result;
use std::process::ExitCode;

fn run() -> Result<()> {
    let resolved = fvm_home::resolve()?;
    let versions = resolved.versions_dir()?;
    let temp = resolved.temp_dir()?;
    let cwd = fvm_home::working_dir()?;

    println!("{}={}", fvm_home::HOME_ENV, resolved.home().display());
    println!("FVM_VERSIONS={}", versions.display());
    println!("FVM_TEMP={}", temp.display());
    println!("PWD={}", cwd.display());
    Ok(())
}

fn main() -> ExitCode {
    fvm_home::logging::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Error messages already embed their io/yaml cause.
            tracing::debug!(error = ?e, "fvm-home failed");
            eprintln!("error: {e}");
            ExitCode::from(1)
        }
    }
}
