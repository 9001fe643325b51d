use miette::Result;

pub fn exec() -> Result<()> {
    let (root, config) = super::project()?;
    let locator = pundler_ops::index_locator(&config)?;
    pundler_ops::ops_lock::lock(&root, &config, &locator)?;
    Ok(())
}
