//! JavaScript bindings for the Folio project catalog
//!
//! Thin wrapper around `folio-core` compiled to WebAssembly.
//! ZERO logic here — all behavior from the canonical Rust implementation.

use folio_core::{verifier, Catalog, CatalogConfig, LookupMode};
use wasm_bindgen::prelude::*;

fn catalog(json: &str, lookup: Option<String>) -> Result<Catalog, JsError> {
    let catalog = Catalog::from_json_str(json).map_err(|e| JsError::new(&e.to_string()))?;
    let lookup = match lookup {
        Some(mode) => mode
            .parse::<LookupMode>()
            .map_err(|e| JsError::new(&e.to_string()))?,
        None => LookupMode::default(),
    };
    Ok(catalog.configured(CatalogConfig {
        lookup,
        ..CatalogConfig::default()
    }))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsError> {
    serde_json::to_string(value).map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

/// Normalize the project data file into the listing's card list.
///
/// @param json - contents of projects.json (array, `{projects: [...]}` or single object)
/// @returns JSON string: array of `{id, title, category, description, image, technologies, liveSite, viewText}`
/// @throws Error if the text is not valid JSON
#[wasm_bindgen(js_name = "listProjects")]
pub fn list_projects(json: &str) -> Result<String, JsError> {
    to_json(&catalog(json, None)?.projects())
}

/// Look up one project card by route id.
///
/// @param json - contents of projects.json
/// @param id - id from the `/projects/:id` route
/// @param lookup - optional "strict" (default) or "listing"
/// @returns JSON string of the card, or `undefined` when not found
/// @throws Error if the text is not valid JSON or the lookup mode is unknown
#[wasm_bindgen(js_name = "findProject")]
pub fn find_project(json: &str, id: &str, lookup: Option<String>) -> Result<Option<String>, JsError> {
    catalog(json, lookup)?
        .find(id)
        .map(|project| to_json(&project))
        .transpose()
}

/// Build the full detail page model for a route id.
///
/// @param json - contents of projects.json
/// @param id - id from the `/projects/:id` route
/// @param lookup - optional "strict" (default) or "listing"
/// @returns JSON string of the detail model, or `undefined` when not found
#[wasm_bindgen(js_name = "projectDetail")]
pub fn project_detail(json: &str, id: &str, lookup: Option<String>) -> Result<Option<String>, JsError> {
    catalog(json, lookup)?
        .detail(id)
        .map(|detail| to_json(&detail))
        .transpose()
}

/// Check the data file for duplicate ids, unreachable projects and gaps.
///
/// @param json - contents of projects.json
/// @returns JSON string: `{ valid: boolean, diagnostics: [...] }`
#[wasm_bindgen(js_name = "verifyCatalog")]
pub fn verify_catalog(json: &str) -> Result<String, JsError> {
    let result = verifier::verify(&catalog(json, None)?);
    to_json(&serde_json::json!({
        "valid": result.is_valid(),
        "diagnostics": result.diagnostics,
    }))
}
