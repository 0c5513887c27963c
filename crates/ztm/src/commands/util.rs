//! Shared helpers for command handlers.

use std::io::IsTerminal;
use std::path::Path;

use ztm_core::MemberRecord;

use crate::error::CliError;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: message.into(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

// ── State file ──────────────────────────────────────────────────────

/// Read the JSON state file. `Ok(None)` when it does not exist yet.
pub fn load_state(path: &Path) -> Result<Option<MemberRecord>, CliError> {
    match std::fs::read_to_string(path) {
        Ok(contents) => Ok(Some(serde_json::from_str(&contents)?)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Like [`load_state`], but a missing file is an error.
pub fn require_state(path: &Path) -> Result<MemberRecord, CliError> {
    load_state(path)?.ok_or_else(|| CliError::NoState {
        path: path.display().to_string(),
    })
}

/// Write the record as pretty JSON, replacing any previous state.
pub fn save_state(path: &Path, record: &MemberRecord) -> Result<(), CliError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(record)?;
    std::fs::write(path, json + "\n")?;
    Ok(())
}

/// Parse a declared member from TOML.
pub fn read_declaration(path: &Path) -> Result<MemberRecord, CliError> {
    let contents = std::fs::read_to_string(path)?;
    let declared: MemberRecord = toml::from_str(&contents)?;
    if declared.network_id.is_empty() || declared.node_id.is_empty() {
        return Err(CliError::Validation {
            field: "declaration".into(),
            reason: format!("{} must set network_id and node_id", path.display()),
        });
    }
    Ok(declared)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn missing_state_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_state(&dir.path().join("absent.json")).unwrap().is_none());
    }

    #[test]
    fn state_survives_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state").join("member.json");
        let mut record = MemberRecord::new("8056c2e21c000001", "0123456789");
        record.id = "8056c2e21c000001-0123456789".into();

        save_state(&path, &record).unwrap();
        assert_eq!(load_state(&path).unwrap(), Some(record));
    }

    #[test]
    fn declaration_requires_identifiers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("member.toml");
        std::fs::write(&path, "name = \"laptop\"\n").unwrap();
        assert!(matches!(
            read_declaration(&path),
            Err(CliError::Validation { .. })
        ));
    }

    #[test]
    fn declaration_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("member.toml");
        std::fs::write(
            &path,
            "network_id = \"8056c2e21c000001\"\nnode_id = \"0123456789\"\n\n[tags]\n1000 = 3\n",
        )
        .unwrap();
        let declared = read_declaration(&path).unwrap();
        assert!(declared.authorized);
        assert_eq!(declared.tags.get("1000"), Some(&3));
    }
}
