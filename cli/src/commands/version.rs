//! Version command

use anyhow::Result;

/// Run the version command.
///
/// # Errors
///
/// Never fails; returns `Result` to match the other handlers.
pub fn run(json: bool) -> Result<()> {
    let version = env!("CARGO_PKG_VERSION");

    if json {
        println!(r#"{{"version":"{version}"}}"#);
    } else {
        println!("mqw-provision {version}");
    }
    Ok(())
}
