use miette::Result;

use pundler_util::errors::PundlerError;

pub fn exec(module: &str) -> Result<()> {
    let (root, config) = super::project()?;
    let spec = pundler_ops::ops_find::find(&root, &config, module)?.ok_or_else(|| {
        PundlerError::Generic {
            message: format!("Module {module} is not provided by any pundle"),
        }
    })?;

    println!("name: {}", spec.name);
    println!("origin: {}", spec.origin.display());
    println!("package: {}", spec.is_package);
    if let Some(locations) = &spec.submodule_search_locations {
        for location in locations {
            println!("search: {}", location.display());
        }
    }
    Ok(())
}
