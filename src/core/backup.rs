use crate::config::Config;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};
use std::fs;
use std::io::{Write, stdin, stdout};
use std::path::{Path, PathBuf};
use zip::ZipWriter;
use zip::write::FileOptions;

pub struct BackupLogic;

impl BackupLogic {
    /// Snapshot the database into `dest_file`, optionally zipping it.
    ///
    /// Uses `VACUUM INTO` on the live connection, so the copy is a
    /// consistent snapshot even if another process is mid-transaction.
    pub fn backup(
        pool: &mut DbPool,
        _cfg: &Config,
        dest_file: &str,
        compress: bool,
    ) -> AppResult<()> {
        let dest = Path::new(dest_file);

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }

        if dest.exists() {
            if !confirm_overwrite(dest)? {
                println!("Backup cancelled by user.");
                return Ok(());
            }
            // VACUUM INTO refuses to overwrite.
            fs::remove_file(dest)?;
        }

        pool.conn
            .execute("VACUUM INTO ?1", [dest.to_string_lossy()])?;
        success(format!("Backup created: {}", dest.display()));

        let final_path = if compress {
            let zipped = compress_backup(dest)?;
            if let Err(e) = fs::remove_file(dest) {
                warning(format!("Failed to remove uncompressed backup: {}", e));
            }
            zipped
        } else {
            dest.to_path_buf()
        };

        let _ = crate::db::log::oplog(
            &pool.conn,
            "backup",
            &final_path.to_string_lossy(),
            if compress {
                "Backup created and compressed"
            } else {
                "Backup created"
            },
        );

        Ok(())
    }
}

fn confirm_overwrite(dest: &Path) -> AppResult<bool> {
    warning(format!(
        "The file '{}' already exists. Overwrite? [y/N]:",
        dest.display()
    ));

    print!("> ");
    stdout().flush().ok();

    let mut answer = String::new();
    stdin().read_line(&mut answer)?;

    let answer = answer.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}

/// Compress a backup using .zip
fn compress_backup(path: &Path) -> AppResult<PathBuf> {
    let zip_path = path.with_extension("zip");
    let file = fs::File::create(&zip_path)?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "hoslog.sqlite".to_string());
    zip.start_file(name, options).map_err(std::io::Error::other)?;

    let mut f = fs::File::open(path)?;
    std::io::copy(&mut f, &mut zip)?;
    zip.finish().map_err(std::io::Error::other)?;

    success(format!("Compressed: {}", zip_path.display()));

    Ok(zip_path)
}
