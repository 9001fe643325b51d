use miette::Result;

pub fn exec() -> Result<()> {
    let (root, config) = super::project()?;
    let locator = pundler_ops::index_locator(&config)?;
    let installer = pundler_ops::pip_installer(&root, &config);
    pundler_ops::ops_install::install(&root, &config, &locator, &installer)?;
    Ok(())
}
