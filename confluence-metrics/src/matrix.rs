//! API matrix: nested interface → API → browser availability view over a
//! chosen set of browser builds, with CSV rendering. Read-side consumer
//! helper; the calculators do not depend on it.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;

use confluence_core::errors::ConfluenceResult;
use confluence_core::keys::BrowserKey;
use confluence_core::traits::FactStore;

/// `interfaceName -> apiName -> browserKey -> true`, ordered for display.
pub type ApiMatrix = BTreeMap<String, BTreeMap<String, BTreeMap<BrowserKey, bool>>>;

/// Row filters applied while building the matrix.
#[derive(Debug, Clone, Default)]
pub struct MatrixOptions {
    /// Case-insensitive substring the `interface#api` key must contain.
    pub search_key: Option<String>,
    /// Per-browser requirements: `true` means the API must be present in
    /// that browser, `false` means it must be absent. Browsers not listed
    /// are unconstrained.
    pub browser_options: Option<FxHashMap<BrowserKey, bool>>,
    /// Keep only APIs exposed by exactly this many of the queried browsers.
    pub length: Option<usize>,
    /// Keep only APIs whose owner count is one of these values.
    pub lengths: Option<Vec<usize>>,
}

/// Build the availability matrix for the given browser builds.
pub async fn to_matrix<S: FactStore>(
    store: &S,
    browser_keys: &[BrowserKey],
    options: &MatrixOptions,
) -> ConfluenceResult<ApiMatrix> {
    let grouped = store.api_keys_grouped(browser_keys).await?;
    let search = options
        .search_key
        .as_ref()
        .map(|needle| needle.to_lowercase());

    let mut matrix = ApiMatrix::new();
    for (api_key, owners) in grouped {
        if let Some(needle) = &search {
            if !api_key.as_str().to_lowercase().contains(needle.as_str()) {
                continue;
            }
        }
        if let Some(browser_options) = &options.browser_options {
            if !satisfies_browser_options(&owners, browser_options) {
                continue;
            }
        }
        if options.length.is_some_and(|length| owners.len() != length) {
            continue;
        }
        if let Some(lengths) = &options.lengths {
            if !lengths.contains(&owners.len()) {
                continue;
            }
        }
        let row = matrix
            .entry(api_key.interface_name().to_string())
            .or_default()
            .entry(api_key.api_name().to_string())
            .or_default();
        for owner in owners {
            row.insert(owner, true);
        }
    }
    Ok(matrix)
}

/// An API row satisfies the options when no owner is marked `false` and
/// every browser marked `true` is an owner.
fn satisfies_browser_options(
    owners: &[BrowserKey],
    browser_options: &FxHashMap<BrowserKey, bool>,
) -> bool {
    let mut required_present = 0;
    for owner in owners {
        match browser_options.get(owner) {
            Some(false) => return false,
            Some(true) => required_present += 1,
            None => {}
        }
    }
    let required = browser_options.values().filter(|wanted| **wanted).count();
    required_present == required
}

/// Render the matrix as CSV: a header of browser keys, then one row per
/// interface member with true/false availability cells.
pub fn to_csv(matrix: &ApiMatrix, browser_keys: &[BrowserKey]) -> String {
    let mut csv = String::from("Interface,API");
    for key in browser_keys {
        csv.push(',');
        csv.push_str(key.as_str());
    }
    csv.push('\n');

    for (interface_name, apis) in matrix {
        for (api_name, owners) in apis {
            csv.push_str(interface_name);
            csv.push(',');
            csv.push_str(api_name);
            for key in browser_keys {
                csv.push(',');
                csv.push_str(if owners.contains_key(key) { "true" } else { "false" });
            }
            csv.push('\n');
        }
    }
    csv
}
