use console::style;
use quietfeedapp::api::CheckResult;
use quietfeedapp::model::Enablement;

pub fn status_line(state: Enablement) -> String {
    match state {
        Enablement::Enabled => format!("{} — AI posts are hidden", style("Enabled").green().bold()),
        Enablement::Disabled => format!("{} — showing all posts", style("Disabled").yellow().bold()),
    }
}

pub fn check_line(result: &CheckResult) -> String {
    if result.matched {
        style("match").red().to_string()
    } else {
        style("no match").dim().to_string()
    }
}
