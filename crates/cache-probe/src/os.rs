// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Host OS display name.

/// Returns a display name for the OS this binary was built for, e.g.
/// `"Linux"`, `"Windows"` or `"Mac OS X"`.
pub fn host_os_name() -> String {
    display_name(std::env::consts::OS).to_string()
}

fn display_name(os: &str) -> &str {
    match os {
        "linux" => "Linux",
        "windows" => "Windows",
        "macos" => "Mac OS X",
        "solaris" | "illumos" => "SunOS",
        "freebsd" => "FreeBSD",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names() {
        assert_eq!(display_name("linux"), "Linux");
        assert_eq!(display_name("windows"), "Windows");
        assert_eq!(display_name("macos"), "Mac OS X");
        assert_eq!(display_name("illumos"), "SunOS");
        assert_eq!(display_name("haiku"), "haiku");
    }

    #[test]
    fn test_host_name_not_empty() {
        assert!(!host_os_name().is_empty());
    }
}
