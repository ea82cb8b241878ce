//! Turns raw platform records into keyed, labelled browsers.

use ondemand_core::constants::os_description;
use ondemand_core::types::{Browser, Orientation, PlatformDescriptor};

/// Derives the cache key for a browser.
///
/// The key is `device + orientation + name + long_version` with whitespace and
/// periods replaced by underscores. Absent parts contribute nothing.
pub fn browser_key(
    device: Option<&str>,
    orientation: Option<Orientation>,
    name: &str,
    long_version: &str,
) -> String {
    let raw = format!(
        "{}{}{}{}",
        device.unwrap_or_default(),
        orientation.map(|o| o.as_str()).unwrap_or_default(),
        name,
        long_version
    );

    raw.chars()
        .map(|c| if c.is_whitespace() || c == '.' { '_' } else { c })
        .collect()
}

/// Builds the display label: name, device type, short version, then orientation.
pub fn browser_label(
    long_name: &str,
    device_type: Option<&str>,
    short_version: &str,
    orientation: Option<Orientation>,
) -> String {
    let mut label = String::from(long_name);
    if let Some(device_type) = device_type {
        label.push(' ');
        label.push_str(device_type);
    }
    label.push(' ');
    label.push_str(short_version);
    if let Some(orientation) = orientation {
        label.push_str(" (");
        label.push_str(orientation.as_str());
        label.push(')');
    }
    label
}

/// Maps a server OS identifier to its public name, passing unknown names through.
pub fn operating_system_name(server_os: &str) -> String {
    os_description(server_os).unwrap_or(server_os).to_string()
}

/// Creates one browser record from a platform, in the given orientation.
pub fn create_browser(platform: &PlatformDescriptor, orientation: Option<Orientation>) -> Browser {
    let device = platform.device.as_deref().filter(|d| !d.trim().is_empty());
    let device_type = platform.device_type.as_deref().filter(|t| !t.trim().is_empty());

    Browser {
        key: browser_key(device, orientation, &platform.api_name, &platform.long_version),
        os: operating_system_name(&platform.os),
        browser_name: platform.api_name.clone(),
        long_name: platform.long_name.clone(),
        short_version: platform.short_version.clone(),
        long_version: platform.long_version.clone(),
        label: browser_label(&platform.long_name, device_type, &platform.short_version, orientation),
        device: device.map(str::to_string),
        device_type: device_type.map(str::to_string),
        orientation,
    }
}

/// Creates the records for one platform.
///
/// Mobile platforms yield a portrait and a landscape record; everything else
/// yields a single record without orientation.
pub fn browsers_for_platform(platform: &PlatformDescriptor) -> Vec<Browser> {
    if platform.has_device() {
        Orientation::ALL
            .iter()
            .map(|o| create_browser(platform, Some(*o)))
            .collect()
    } else {
        vec![create_browser(platform, None)]
    }
}

/// Creates the records for a whole platform list, preserving input order.
pub fn build_browsers(platforms: &[PlatformDescriptor]) -> Vec<Browser> {
    platforms.iter().flat_map(browsers_for_platform).collect()
}
