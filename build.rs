use shadow_rs::{BuildPattern, ShadowBuilder};
use std::process::Command;

fn main() -> shadow_rs::SdResult<()> {
    ShadowBuilder::builder().build_pattern(BuildPattern::RealTime).build()?;

    if let Ok(output) = Command::new("git").args(["log", "-1", "--pretty=%h %s"]).output()
        && let Ok(summary) = String::from_utf8(output.stdout)
    {
        println!("cargo:rustc-env=LAZYWEATHER_COMMIT_SUMMARY={}", summary.trim());
    }

    Ok(())
}
