//! Series validator: checks a server/client pair against the guarantees of
//! reliable in-order delivery.
//!
//! Every packet admitted to the server's input buffer must be delivered to
//! the client's output buffer exactly once, in the same order, and never
//! before it was admitted. The series are compared strictly by position; no
//! realignment by sequence number is attempted. The first failing check is
//! reported and the rest are not examined.

use chrono::NaiveDateTime;

use crate::types::LogEntry;

/// Why a server/client pair is inconsistent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Mismatch {
    #[error("server logged {server_len} packets but client logged {client_len}")]
    LengthMismatch { server_len: usize, client_len: usize },

    #[error(
        "sequence numbers differ at position {position}: server {server_sn:?}, client {client_sn:?}"
    )]
    SequenceNumberMismatch {
        position: usize,
        server_sn: String,
        client_sn: String,
    },

    #[error("packet {sn:?} reached the client at {client_ts} before the server admitted it at {server_ts}")]
    OrderingViolation {
        sn: String,
        server_ts: NaiveDateTime,
        client_ts: NaiveDateTime,
    },
}

/// Validate `client` against `server`.
///
/// Returns `Ok(())` only if the lengths match and, at every position, the
/// sequence numbers are equal and the server timestamp is not after the
/// client timestamp.
pub fn validate(server: &[LogEntry], client: &[LogEntry]) -> Result<(), Mismatch> {
    if server.len() != client.len() {
        return Err(Mismatch::LengthMismatch {
            server_len: server.len(),
            client_len: client.len(),
        });
    }

    for (position, (srv, cli)) in server.iter().zip(client).enumerate() {
        if srv.sn != cli.sn {
            return Err(Mismatch::SequenceNumberMismatch {
                position,
                server_sn: srv.sn.clone(),
                client_sn: cli.sn.clone(),
            });
        }
        if srv.ts > cli.ts {
            return Err(Mismatch::OrderingViolation {
                sn: srv.sn.clone(),
                server_ts: srv.ts,
                client_ts: cli.ts,
            });
        }
    }

    Ok(())
}
