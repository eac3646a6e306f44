//! Doctor command - check environment

use anyhow::Result;
use std::path::Path;

use crate::addon::Platform;
use crate::git;

pub fn run(dir: &Path) -> Result<()> {
    println!("🩺 gitlog-addon Doctor\n");

    // Check git itself
    match git::run_git(dir, &["--version"]) {
        Ok(out) if out.success() => println!("✓ git: {}", out.stdout.trim()),
        _ => {
            println!("✗ git: not found on PATH");
            println!("  Install git; the addon resolves all metadata through it");
            return Ok(());
        }
    }

    // Check repository + root
    match git::repo_root(dir) {
        Ok(root) => println!("✓ Repository root: {}", root.display()),
        Err(_) => {
            println!("○ Repository: {} is not inside a git repository", dir.display());
            return Ok(());
        }
    }

    // Check origin remote
    let url = git::repository_url(dir);
    if url.is_empty() {
        println!("○ Remote origin: none configured (repository URL publishes as \"\")");
    } else {
        println!("✓ Remote origin: {url}");
    }

    // Check the tty device log-based lookups may need
    let platform = Platform::current();
    let tty = platform.tty_device();
    if platform == Platform::Windows || Path::new(tty).exists() {
        println!("✓ Terminal device: {tty}");
    } else {
        println!("○ Terminal device: {tty} unavailable (headless?)");
        println!("  On linux the contributor mode downgrades to 'log' when a lookup hits this");
    }

    println!("\n✅ Checks complete");
    Ok(())
}
