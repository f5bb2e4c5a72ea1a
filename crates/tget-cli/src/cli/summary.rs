use tget_core::session::TransferSession;
use tget_core::units::{average_kbps, bytes_to_kb};

/// `Downloaded X kb in Y seconds with an average speed of Z kb/s`.
pub fn summary_line(session: &TransferSession) -> String {
    let bytes = session.transferred_bytes();
    let secs = session.elapsed().map(|d| d.as_secs_f64()).unwrap_or(0.0);
    format!(
        "Downloaded {} kb in {} seconds with an average speed of {} kb/s",
        bytes_to_kb(bytes),
        secs as u64,
        average_kbps(bytes, secs)
    )
}
