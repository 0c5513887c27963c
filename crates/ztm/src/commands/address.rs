//! Offline address derivation.

use serde::Serialize;

use ztm_core::address;

use crate::cli::{AddressArgs, GlobalOpts};
use crate::error::CliError;
use crate::output::{self, Field};

#[derive(Debug, Serialize)]
struct DerivedAddresses {
    network_id: String,
    node_id: String,
    rfc4193_address: String,
    zt6plane_address: String,
}

fn detail(a: &DerivedAddresses) -> Vec<Field> {
    vec![
        Field::new("Network", a.network_id.clone()),
        Field::new("Node", a.node_id.clone()),
        Field::new("RFC4193", a.rfc4193_address.clone()),
        Field::new("6PLANE", a.zt6plane_address.clone()),
    ]
}

fn plain(a: &DerivedAddresses) -> String {
    format!("{}\n{}", a.rfc4193_address, a.zt6plane_address)
}

pub fn handle(args: AddressArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let derived = DerivedAddresses {
        rfc4193_address: address::rfc4193_address(&args.network_id, &args.node_id)?,
        zt6plane_address: address::six_plane_address(&args.network_id, &args.node_id),
        network_id: args.network_id,
        node_id: args.node_id,
    };

    let out = output::render_single(&global.output, &derived, detail, plain)?;
    output::print_output(&out, global.quiet);
    Ok(())
}
