use console::Style;
use miette::Result;

pub fn exec() -> Result<()> {
    let (root, config) = super::project()?;
    let installed = pundler_ops::ops_list::list(&root, &config)?;

    if installed.is_empty() {
        println!("No pundles installed in {}", config.pundle_dir);
        return Ok(());
    }

    let bold = Style::new().bold();
    for (name, versions) in &installed {
        println!("{} {}", bold.apply_to(name), versions.join(", "));
    }
    Ok(())
}
