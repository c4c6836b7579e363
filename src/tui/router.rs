//! View routing: which screen a session state maps to.

use crate::session::{PageMode, Session};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Form,
    Loading,
    Result,
    /// Result with an error and nothing to show: "Generation Failed".
    ResultFailed,
    Dashboard,
    /// Dashboard before any business exists.
    DashboardEmpty,
}

impl View {
    pub fn title(self) -> &'static str {
        match self {
            View::Form => "Create your website",
            View::Loading => "Building your website",
            View::Result => "Your website",
            View::ResultFailed => "Generation failed",
            View::Dashboard | View::DashboardEmpty => "Dashboard",
        }
    }
}

pub fn route(session: &Session) -> View {
    match session.mode() {
        PageMode::Form => View::Form,
        PageMode::Loading => View::Loading,
        PageMode::Result if session.artifact().is_empty() && session.error().is_some() => {
            View::ResultFailed
        }
        PageMode::Result => View::Result,
        PageMode::Dashboard if session.dashboard_snapshot().is_none() => View::DashboardEmpty,
        PageMode::Dashboard => View::Dashboard,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::GenerationError;
    use crate::session::{Field, Page};

    fn filled() -> Session {
        let mut s = Session::new("en-US");
        s.set_field(Field::UserName, "Ana");
        s.set_field(Field::BusinessName, "Ana's Bakery");
        s.set_field(Field::Description, "We sell cakes");
        s.select_palette("Elegant");
        s
    }

    #[test]
    fn fresh_session_is_form() {
        assert_eq!(route(&Session::new("en-US")), View::Form);
    }

    #[test]
    fn loading_then_result() {
        let mut s = filled();
        let job = s.submit().unwrap();
        assert_eq!(route(&s), View::Loading);
        s.apply_website(job.ticket, Ok("<!DOCTYPE html><html></html>".into()));
        assert_eq!(route(&s), View::Result);
    }

    #[test]
    fn failure_without_artifact_is_failed_view() {
        let mut s = filled();
        let job = s.submit().unwrap();
        s.apply_website(job.ticket, Err(GenerationError::Api("boom".into())));
        assert_eq!(route(&s), View::ResultFailed);
    }

    #[test]
    fn failure_with_prior_artifact_stays_result() {
        let mut s = filled();
        let job = s.submit().unwrap();
        s.apply_website(job.ticket, Ok("<!DOCTYPE html>".into()));
        let job = s.submit().unwrap();
        s.apply_website(job.ticket, Ok("Sorry, I can't help.".into()));
        assert_eq!(route(&s), View::Result);
    }

    #[test]
    fn dashboard_empty_without_business() {
        let mut s = Session::new("en-US");
        s.navigate(Page::Dashboard);
        assert_eq!(route(&s), View::DashboardEmpty);

        let mut s = filled();
        s.navigate(Page::Dashboard);
        assert_eq!(route(&s), View::Dashboard);
    }
}
