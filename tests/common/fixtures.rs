//! Static log corpora and on-disk log set helpers used across harnesses.

use std::path::Path;

/// Scenario A, server side.
pub const SCENARIO_A_SERVER: &str =
    "Adding packet with SN 2 to IB at time 2024-11-27 19:16:12.309514278";

/// Scenario A, client side.
pub const SCENARIO_A_CLIENT: &str =
    "Pushed packet with SN 2 to OB at time 2024-11-27 19:16:12.350295886";

/// A server log as the benchmark writes it: logger chatter interleaved with
/// input-buffer admissions.
pub const CORPUS_SERVER: &[&str] = &[
    "[ INFO  ]: logging level set to INFO",
    "[ INFO  ]: server connected",
    "Adding packet with SN 0 to IB at time 2024-11-27 19:16:12.300000000",
    "[ DEBUG ]: sent packet with SN 0",
    "Adding packet with SN 1 to IB at time 2024-11-27 19:16:12.304000000",
    "Adding packet with SN 2 to IB at time 2024-11-27 19:16:12.309514278",
    "[ INFO  ]: end of transmission",
];

/// The client log matching [`CORPUS_SERVER`].
pub const CORPUS_CLIENT: &[&str] = &[
    "[ INFO  ]: logging level set to INFO",
    "[ INFO  ]: client connected",
    "Pushed packet with SN 0 to OB at time 2024-11-27 19:16:12.310000000",
    "[ DEBUG ]: received packet with SN 1",
    "Pushed packet with SN 1 to OB at time 2024-11-27 19:16:12.330500000",
    "Pushed packet with SN 2 to OB at time 2024-11-27 19:16:12.350295886",
];

/// Lines that look close to log lines but must never produce an entry on
/// either side.
pub const CORPUS_NOISE: &[&str] = &[
    "",
    "Adding packet with SN 4 to IB",
    "Pushed packet with SN 4 to OB",
    "something to IB at time 2024-11-27 19:16:12.1",
    "something to OB at time 2024-11-27 19:16:12.1",
    "Adding packet with SN 5 to IB at time not a time",
    "Pushed packet with SN 5 to OB at time 2024-13-45 99:99:99",
];

/// `n` synthetic server/client line pairs with delays growing by 0.25 ms.
pub fn corpus_run(n: usize) -> (Vec<String>, Vec<String>) {
    (0..n)
        .map(|i| {
            let sent_us = i * 1_000;
            let recv_us = sent_us + 1_000 + i * 250;
            (
                format!(
                    "Adding packet with SN {i} to IB at time 2024-11-27 19:16:{:02}.{:06}",
                    sent_us / 1_000_000,
                    sent_us % 1_000_000
                ),
                format!(
                    "Pushed packet with SN {i} to OB at time 2024-11-27 19:16:{:02}.{:06}",
                    recv_us / 1_000_000,
                    recv_us % 1_000_000
                ),
            )
        })
        .unzip()
}

/// Write `server_<name>` and `client_<name>` into `dir`.
pub fn write_log_set<S: AsRef<str>>(
    dir: &Path,
    name: &str,
    server: &[S],
    client: &[S],
) -> std::io::Result<()> {
    std::fs::write(dir.join(format!("server_{name}")), join_lines(server))?;
    std::fs::write(dir.join(format!("client_{name}")), join_lines(client))
}

fn join_lines<S: AsRef<str>>(lines: &[S]) -> String {
    let mut out = String::new();
    for line in lines {
        out.push_str(line.as_ref());
        out.push('\n');
    }
    out
}
