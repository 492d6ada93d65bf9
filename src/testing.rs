//! Shared test fixtures: a shell stub standing in for the external markup
//! converter, so tests never depend on multimarkdown being installed.

use crate::config::SiteConfig;
use std::{fs, os::unix::fs::PermissionsExt, path::Path};

/// Stub converter: front matter is every leading `key: value` line up to the
/// first blank line, the body is everything after it. Bodies render as a
/// single `<p>` wrapper, which is enough structure for fragment trimming.
const CONVERTER_STUB: &str = r#"#!/bin/sh
mode="$1"; shift
require_file() {
  [ -f "$1" ] || { echo "no such file: $1" >&2; exit 1; }
}
case "$mode" in
  -m)
    require_file "$1"
    sed '/^$/q' "$1" | sed -n 's/^\([A-Za-z][A-Za-z0-9_]*\):.*/\1/p'
    ;;
  -e)
    field="$1"; file="$2"
    require_file "$file"
    sed '/^$/q' "$file" | sed -n "s/^$field:[[:space:]]*\(.*\)/\1/p"
    ;;
  -s)
    if [ "$#" -ge 1 ]; then
      require_file "$1"
      body=$(sed '1,/^$/d' "$1")
    else
      body=$(cat | sed '/^$/d')
    fi
    printf '<p>%s</p>\n' "$body"
    ;;
  *)
    echo "unknown flag $mode" >&2
    exit 1
    ;;
esac
"#;

/// Write the stub converter script into `dir` and return its command vector.
pub fn stub_command(dir: &Path) -> Vec<String> {
    let script = dir.join("mmd-stub");
    fs::write(&script, CONVERTER_STUB).unwrap();
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
    vec![script.to_string_lossy().into_owned()]
}

/// Default config rooted at `root`, with the converter stubbed out.
pub fn stub_config(root: &Path) -> SiteConfig {
    let mut config = SiteConfig::default();
    config.set_root(root);
    config.converter.command = stub_command(root);
    config.converter.timeout_secs = 5;
    config
}

/// Write a source file under `root`, creating parent directories.
pub fn write_source(root: &Path, rel: &str, content: &str) -> std::path::PathBuf {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

/// Write a template file under the config's template directory.
pub fn write_template(config: &SiteConfig, name: &str, content: &str) {
    let dir = config.template_dir();
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(format!("{name}.template")), content).unwrap();
}
