//! Member subcommand handlers.

use std::path::Path;

use tracing::{info, warn};

use ztm_core::{ApiError, CentralClient, MemberReconciler, MemberRecord, MemberState};

use crate::cli::{GlobalOpts, MemberArgs, MemberCommand};
use crate::commands::util;
use crate::config;
use crate::error::CliError;
use crate::output::{self, Field};

type Reconciler = MemberReconciler<CentralClient>;

// ── Detail rendering ────────────────────────────────────────────────

fn detail(m: &MemberRecord) -> Vec<Field> {
    vec![
        Field::new("ID", m.id.clone()),
        Field::new("Network", m.network_id.clone()),
        Field::new("Node", m.node_id.clone()),
        Field::new("Name", m.name.clone()),
        Field::new("Description", m.description.clone()),
        Field::new("Authorized", m.authorized.to_string()),
        Field::new("Hidden", m.hidden.to_string()),
        Field::new("Bridging", m.allow_ethernet_bridging.to_string()),
        Field::new("No Auto IPs", m.no_auto_assign_ips.to_string()),
        Field::new("IPv4", output::joined(&m.ipv4_assignments)),
        Field::new("IPv6", output::joined(&m.ipv6_assignments)),
        Field::new("RFC4193", m.rfc4193_address.clone()),
        Field::new("6PLANE", m.zt6plane_address.clone()),
        Field::new("Capabilities", output::joined(&m.capabilities)),
        Field::new(
            "Tags",
            output::joined(m.tags.iter().map(|(k, v)| format!("{k}={v}"))),
        ),
    ]
}

fn print_member(record: &MemberRecord, global: &GlobalOpts) -> Result<(), CliError> {
    let out = output::render_single(&global.output, record, detail, |m| m.id.clone())?;
    output::print_output(&out, global.quiet);
    Ok(())
}

fn connect(global: &GlobalOpts) -> Result<Reconciler, CliError> {
    let client = config::resolve_client_config(global)?.build_client()?;
    Ok(MemberReconciler::new(client))
}

// ── Apply ───────────────────────────────────────────────────────────

/// Converge Central onto `declared`, given the last recorded state.
///
/// A forced replacement records the deletion in `state_path` before the
/// replacement is created.
async fn apply(
    reconciler: &Reconciler,
    declared: MemberRecord,
    prior: Option<MemberRecord>,
    state_path: &Path,
) -> Result<MemberRecord, CliError> {
    match prior {
        Some(mut current) if current.is_created() => {
            if let Some(field) = current.immutable_change(&declared) {
                info!(field, "identifier changed, replacing member");
                replace(reconciler, &mut current).await?;
                util::save_state(state_path, &current)?;
                return create(reconciler, declared).await;
            }

            let mut desired = current.clone();
            desired.merge_mutable(&declared);
            reconciler.update(&current, &mut desired).await?;
            refresh(reconciler, &mut desired).await?;
            Ok(desired)
        }
        _ => create(reconciler, declared).await,
    }
}

/// Delete the member being replaced. One that is already gone counts as deleted.
async fn replace(reconciler: &Reconciler, current: &mut MemberRecord) -> Result<(), CliError> {
    match reconciler.delete(current).await {
        Err(e) if e.api_error().is_some_and(ApiError::is_not_found) => {
            warn!(
                network_id = %current.network_id,
                node_id = %current.node_id,
                "member to replace was already gone"
            );
            current.clear_id();
            Ok(())
        }
        other => other.map_err(CliError::from),
    }
}

async fn create(reconciler: &Reconciler, mut record: MemberRecord) -> Result<MemberRecord, CliError> {
    reconciler.create(&mut record).await?;
    refresh(reconciler, &mut record).await?;
    Ok(record)
}

async fn refresh(reconciler: &Reconciler, record: &mut MemberRecord) -> Result<MemberState, CliError> {
    let state = reconciler.read(record).await?;
    if state == MemberState::Absent {
        warn!(
            network_id = %record.network_id,
            node_id = %record.node_id,
            "member missing on Central; next apply will recreate it"
        );
    }
    Ok(state)
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(args: MemberArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        MemberCommand::Apply { file, state } => {
            let declared = util::read_declaration(&file)?;
            let prior = util::load_state(&state.state)?;
            let reconciler = connect(global)?;

            let record = apply(&reconciler, declared, prior, &state.state).await?;
            util::save_state(&state.state, &record)?;
            print_member(&record, global)
        }

        MemberCommand::Refresh { state } => {
            let mut record = util::require_state(&state.state)?;
            let reconciler = connect(global)?;

            refresh(&reconciler, &mut record).await?;
            util::save_state(&state.state, &record)?;
            print_member(&record, global)
        }

        MemberCommand::Destroy { state } => {
            let mut record = util::require_state(&state.state)?;
            let prompt = format!(
                "Remove member {}-{} from its network?",
                record.network_id, record.node_id
            );
            if !util::confirm(&prompt, global.yes)? {
                return Ok(());
            }
            let reconciler = connect(global)?;

            reconciler.delete(&mut record).await?;
            remove_state(&state.state)?;
            if !global.quiet {
                eprintln!("Member {}-{} removed", record.network_id, record.node_id);
            }
            Ok(())
        }

        MemberCommand::Exists { state } => {
            let mut record = util::require_state(&state.state)?;
            let reconciler = connect(global)?;

            let exists = reconciler.exists(&mut record).await?;
            util::save_state(&state.state, &record)?;
            output::print_output(&exists.to_string(), global.quiet);
            Ok(())
        }

        MemberCommand::Import { id, state } => {
            let mut record = MemberRecord::import(id.clone());
            let reconciler = connect(global)?;

            if reconciler.read(&mut record).await? == MemberState::Absent {
                return Err(CliError::NotFound {
                    resource_type: "member".into(),
                    identifier: id,
                });
            }
            util::save_state(&state.state, &record)?;
            print_member(&record, global)
        }
    }
}

fn remove_state(path: &Path) -> Result<(), CliError> {
    match std::fs::remove_file(path) {
        Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e.into()),
        _ => Ok(()),
    }
}
