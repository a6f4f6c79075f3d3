use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Subcommand;
use plinth_api::upload::UploadFile;
use plinth_api::ApiClient;

#[derive(Subcommand, Debug)]
pub enum UploadCommand {
    /// Upload a blog image
    BlogImage {
        file: PathBuf,
        /// Storage folder under the blog bucket
        #[arg(long)]
        folder: Option<String>,
    },
    /// Upload a portfolio photo or video
    PortfolioMedia { file: PathBuf },
    /// Upload a work header image
    WorkImage { file: PathBuf },
    /// Delete an uploaded file
    Rm {
        #[arg(long)]
        bucket: String,
        /// Storage path as returned by the upload
        #[arg(long)]
        path: String,
    },
}

pub async fn run(client: Arc<ApiClient>, command: UploadCommand) -> Result<()> {
    match command {
        UploadCommand::BlogImage { file, folder } => {
            let file = read_upload(&file)?;
            let response = client.upload_blog_image(file, folder.as_deref()).await?;
            println!("{}", response.url);
            println!("path: {}", response.path);
        }
        UploadCommand::PortfolioMedia { file } => {
            let file = read_upload(&file)?;
            let response = client.upload_portfolio_media(file).await?;
            println!("{}", response.url);
            println!("path: {}  type: {}", response.path, response.media_type.as_str());
        }
        UploadCommand::WorkImage { file } => {
            let file = read_upload(&file)?;
            let response = client.upload_work_image(file).await?;
            println!("{}", response.url);
            println!("path: {}", response.path);
        }
        UploadCommand::Rm { bucket, path } => {
            let message = client.delete_file(&bucket, &path).await?;
            println!("{}", message.message);
        }
    }

    Ok(())
}

fn read_upload(path: &Path) -> Result<UploadFile> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .context("File name is not valid UTF-8")?
        .to_string();
    let content_type = guess_content_type(&file_name).to_string();

    Ok(UploadFile {
        file_name,
        content_type,
        bytes,
    })
}

/// MIME type from the file extension; the server validates the real kind.
fn guess_content_type(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "mp4" => "video/mp4",
        "mov" => "video/quicktime",
        "webm" => "video/webm",
        _ => "application/octet-stream",
    }
}
