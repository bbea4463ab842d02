//! Loading of the scene's fixed asset files.
//!
//! The scene needs exactly three files, all addressed by fixed relative names
//! under `assets/`: the two WGSL shader sources and the crate's
//! block-compressed DDS texture. Native builds read them from disk, WASM
//! builds fetch them relative to the page origin.

use crate::texture::Texture;

pub const VERTEX_SHADER_ASSET: &str = "shaders/crate_vs.wgsl";
pub const FRAGMENT_SHADER_ASSET: &str = "shaders/crate_fs.wgsl";
pub const CRATE_TEXTURE_ASSET: &str = "textures/wood_crate.dds";

#[cfg(target_arch = "wasm32")]
fn format_url(file_name: &str) -> reqwest::Url {
    let window = web_sys::window().unwrap();
    let location = window.location();
    let mut origin = location.origin().unwrap();
    if !origin.ends_with("assets") {
        origin = format!("{}/assets", origin);
    }
    let base = reqwest::Url::parse(&format!("{}/", origin)).unwrap();
    base.join(file_name).unwrap()
}

pub async fn load_string(file_name: &str) -> anyhow::Result<String> {
    #[cfg(target_arch = "wasm32")]
    let txt = {
        let url = format_url(file_name);
        reqwest::get(url).await?.text().await?
    };
    #[cfg(not(target_arch = "wasm32"))]
    let txt = {
        let path = std::path::Path::new("./").join("assets").join(file_name);
        std::fs::read_to_string(path)?
    };

    Ok(txt)
}

pub async fn load_binary(file_name: &str) -> anyhow::Result<Vec<u8>> {
    #[cfg(target_arch = "wasm32")]
    let data = {
        let url = format_url(file_name);
        reqwest::get(url).await?.bytes().await?.to_vec()
    };
    #[cfg(not(target_arch = "wasm32"))]
    let data = {
        let path = std::path::Path::new("./").join("assets").join(file_name);
        std::fs::read(path)?
    };

    Ok(data)
}

/// Load and decode a texture file; the file extension doubles as the decode
/// hint so the DDS container is not sniffed.
pub async fn load_texture(
    file_name: &str,
    device: &wgpu::Device,
    queue: &wgpu::Queue,
) -> anyhow::Result<Texture> {
    let data = load_binary(file_name).await?;
    let format = std::path::Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str());
    Texture::from_bytes(device, queue, &data, file_name, format)
}
