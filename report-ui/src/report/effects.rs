use dioxus::prelude::{ReadableExt, Signal, WritableExt};
use dioxus_logger::tracing::{debug, info, warn};
use report_types::{
    LoadError, LoadOutcome, LoadTicket, Report, ReportError, ReportSession, TestDetail, Transport,
};

use crate::api::{bundle_url, fetch_bundle, fetch_test_cases, viewer_config, TestCase};
use crate::interop::{load_script, read_global_json, take_global_json};

/// Read the report object the page defines before the viewer starts.
pub fn read_report() -> Result<Report, ReportError> {
    let global = &viewer_config().report_global;
    let text =
        read_global_json(global).ok_or_else(|| ReportError::MissingGlobal(global.clone()))?;
    Report::from_script(&text)
}

pub fn bootstrap_report(mut session: Signal<ReportSession>, mut error: Signal<Option<String>>) {
    match read_report() {
        Ok(report) => {
            info!("Loaded report with {} tests", report.test_names.len());
            session.set(ReportSession::new(report));
            error.set(None);
        }
        Err(e) => {
            warn!("Report unavailable: {}", e);
            error.set(Some(e.to_string()));
        }
    }
}

fn read_bundle_global() -> Result<TestDetail, LoadError> {
    let global = &viewer_config().bundle_global;
    let text = take_global_json(global).ok_or_else(|| LoadError::MissingGlobal(global.clone()))?;
    TestDetail::from_script(&text)
}

/// Fetch the bundle for `ticket` and hand the result to the session, which
/// drops it if a newer selection has been made meanwhile.
pub async fn load_test_details(mut session: Signal<ReportSession>, ticket: LoadTicket) {
    let url = bundle_url(&ticket.name);
    debug!("Loading test details for {} from {}", ticket.name, url);

    let result = match viewer_config().transport {
        Transport::Fetch => fetch_bundle(&url).await,
        Transport::Script => match load_script(&url).await {
            Ok(()) if !session.read().is_current(&ticket) => {
                // Leave the global alone; it may already hold the newer bundle.
                debug!("Discarding superseded bundle for {}", ticket.name);
                return;
            }
            Ok(()) => read_bundle_global(),
            Err(e) => Err(e),
        },
    };

    match session.write().complete(&ticket, result) {
        LoadOutcome::Applied => info!("Loaded test details for {}", ticket.name),
        LoadOutcome::Stale => debug!("Ignored stale load for {}", ticket.name),
        LoadOutcome::Rejected(e) => warn!("Test details for {} could not be loaded: {}", ticket.name, e),
    }
}

pub async fn load_test_cases(mut test_cases: Signal<Vec<TestCase>>) {
    match fetch_test_cases().await {
        Ok(cases) => test_cases.set(cases),
        Err(e) => debug!("Test case list unavailable: {}", e),
    }
}
