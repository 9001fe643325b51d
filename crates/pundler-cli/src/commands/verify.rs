use miette::Result;

pub fn exec() -> Result<()> {
    let (root, config) = super::project()?;
    pundler_ops::ops_verify::verify(&root, &config)?;
    Ok(())
}
