use std::io::Cursor;

use crate::config::CanvasConfig;
use crate::error::Result;
use crate::surface::RasterSurface;

/// Encodes the surface as a PNG with straight alpha. Blank pixels stay transparent.
pub fn encode_png(surface: &RasterSurface) -> Result<Vec<u8>> {
    let image = image::RgbaImage::from_fn(surface.pixel_width(), surface.pixel_height(), |x, y| {
        image::Rgba(surface.pixel(x, y).unwrap_or([0; 4]))
    });

    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)?;
    Ok(bytes)
}

/// Encodes the surface and hands it to the user under `config.export_file_name`.
///
/// Returns a short description of where the image went.
pub fn export_png(surface: &RasterSurface, config: &CanvasConfig) -> Result<String> {
    let bytes = encode_png(surface)?;
    log::info!(
        "Exporting {}x{} PNG ({} bytes)",
        surface.pixel_width(),
        surface.pixel_height(),
        bytes.len()
    );
    deliver(&bytes, config)
}

#[cfg(not(target_arch = "wasm32"))]
fn deliver(bytes: &[u8], config: &CanvasConfig) -> Result<String> {
    let path = config.export_dir.join(&config.export_file_name);
    std::fs::write(&path, bytes)?;
    log::info!("Saved {}", path.display());
    Ok(path.display().to_string())
}

#[cfg(target_arch = "wasm32")]
fn deliver(bytes: &[u8], config: &CanvasConfig) -> Result<String> {
    use crate::error::CanvasError;
    use wasm_bindgen::JsCast as _;

    let web_err = |err: wasm_bindgen::JsValue| CanvasError::Web(format!("{err:?}"));

    let parts = js_sys::Array::of1(&js_sys::Uint8Array::from(bytes));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type("image/png");
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)
        .map_err(web_err)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(web_err)?;

    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| CanvasError::Web("no document available".to_owned()))?;
    let link = document
        .create_element("a")
        .map_err(web_err)?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|_| CanvasError::Web("created element is not an anchor".to_owned()))?;
    link.set_href(&url);
    link.set_download(&config.export_file_name);
    link.click();

    web_sys::Url::revoke_object_url(&url).map_err(web_err)?;
    Ok(format!("download of {}", config.export_file_name))
}
