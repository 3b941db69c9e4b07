use crate::build;

/// Version string shown by `--version`, with the commit it was built from.
pub fn long_version() -> String {
    let commit = option_env!("LAZYWEATHER_COMMIT_SUMMARY").unwrap_or(build::SHORT_COMMIT);
    let state = if build::GIT_CLEAN { "" } else { " (dirty)" };

    format!(
        "{} ({}{})\nBuilt {} for {} with {}",
        build::PKG_VERSION,
        commit,
        state,
        build::BUILD_TIME,
        build::BUILD_TARGET,
        build::RUST_VERSION,
    )
}
