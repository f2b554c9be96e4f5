//! Guarded actions and permission gates
//!
//! [`Guard::guard`] wraps a handler so that every invocation re-checks the
//! session's current permission set. A denied call does not run the handler;
//! it publishes a warning notice naming the action and returns `None`.
//!
//! [`Gate`] is the rendering counterpart: children are produced only when the
//! requirement is met, otherwise nothing (or the fallback) is.

use super::permissions::Required;
use super::session::SessionHandle;
use crate::notice::{Notice, NoticeBus};

/// Factory for guarded handlers bound to one session
#[derive(Debug, Clone)]
pub struct Guard {
    session: SessionHandle,
    notices: NoticeBus,
}

impl Guard {
    pub fn new(session: SessionHandle, notices: NoticeBus) -> Self {
        Self { session, notices }
    }

    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    pub fn notices(&self) -> &NoticeBus {
        &self.notices
    }

    /// One-off check that publishes the denial notice
    ///
    /// `label` overrides the label derived from the first required key.
    pub fn check<'a>(&self, required: impl Into<Required<'a>>, label: Option<&str>) -> bool {
        let required = required.into();
        if self.session.can(required) {
            return true;
        }
        let label = label.map(str::to_string).unwrap_or_else(|| required.label());
        tracing::warn!(required = ?required.keys(), label = %label, "Action denied");
        self.notices.publish(Notice::denied(label));
        false
    }

    /// Wrap `handler` behind `required`
    pub fn guard<'a, F>(
        &self,
        handler: F,
        required: impl Into<Required<'a>>,
        label: Option<&str>,
    ) -> Guarded<F> {
        let required = required.into();
        Guarded {
            handler,
            label: label.map(str::to_string).unwrap_or_else(|| required.label()),
            required: required.keys().iter().map(|k| k.to_string()).collect(),
            guard: self.clone(),
        }
    }
}

/// Handler wrapped by [`Guard::guard`]
pub struct Guarded<F> {
    handler: F,
    required: Vec<String>,
    label: String,
    guard: Guard,
}

impl<F> Guarded<F> {
    /// Whether the wrapped action is currently allowed (for disabling controls)
    pub fn is_allowed(&self) -> bool {
        let keys: Vec<&str> = self.required.iter().map(String::as_str).collect();
        self.guard.session.can(keys.as_slice())
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Invoke the handler if allowed; `None` means denied
    ///
    /// Multiple arguments are passed as a tuple.
    pub fn call<A, R>(&mut self, args: A) -> Option<R>
    where
        F: FnMut(A) -> R,
    {
        let keys: Vec<&str> = self.required.iter().map(String::as_str).collect();
        if self.guard.check(keys.as_slice(), Some(self.label.as_str())) {
            Some((self.handler)(args))
        } else {
            None
        }
    }
}

/// Conditional rendering behind a permission requirement
#[derive(Debug, Clone)]
pub struct Gate {
    session: SessionHandle,
}

impl Gate {
    pub fn new(session: SessionHandle) -> Self {
        Self { session }
    }

    /// Children when allowed, nothing otherwise
    pub fn render<'a, T>(
        &self,
        required: impl Into<Required<'a>>,
        children: impl FnOnce() -> T,
    ) -> Option<T> {
        self.session.can(required).then(children)
    }

    /// Children when allowed, the fallback otherwise
    pub fn render_or<'a, T>(
        &self,
        required: impl Into<Required<'a>>,
        children: impl FnOnce() -> T,
        fallback: impl FnOnce() -> T,
    ) -> T {
        if self.session.can(required) {
            children()
        } else {
            fallback()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::permissions::{Principal, VIEW_PAYMENTS, VIEW_SALES};
    use crate::notice::NoticeLevel;

    fn signed_in(perms: &[&str], role: &str) -> (Guard, tokio::sync::broadcast::Receiver<Notice>) {
        let session = SessionHandle::new();
        session.sign_in(Principal::new("u@x.com", role, perms.iter().copied()));
        let notices = NoticeBus::new(8);
        let rx = notices.subscribe();
        (Guard::new(session, notices), rx)
    }

    #[test]
    fn test_denied_handler_not_invoked() {
        let (guard, mut rx) = signed_in(&[VIEW_SALES], "staff");
        let mut calls = 0;
        let mut wrapped = guard.guard(|()| calls += 1, VIEW_PAYMENTS, Some("view payments"));

        assert_eq!(wrapped.call(()), None);
        drop(wrapped);
        assert_eq!(calls, 0);

        let notice = rx.try_recv().unwrap();
        assert_eq!(notice.level, NoticeLevel::Warning);
        assert_eq!(notice.label.as_deref(), Some("view payments"));
    }

    #[test]
    fn test_allowed_forwards_arguments_and_result() {
        let (guard, mut rx) = signed_in(&[VIEW_SALES], "staff");
        let mut wrapped = guard.guard(|(a, b): (i32, i32)| a + b, VIEW_SALES, None);

        assert!(wrapped.is_allowed());
        assert_eq!(wrapped.call((2, 3)), Some(5));
        assert_eq!(wrapped.call((10, -4)), Some(6));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_label_derived_from_key() {
        let (guard, mut rx) = signed_in(&[], "staff");
        let mut wrapped = guard.guard(|_: ()| (), VIEW_PAYMENTS, None);
        assert_eq!(wrapped.label(), "view payments");

        assert!(wrapped.call(()).is_none());
        assert_eq!(rx.try_recv().unwrap().label.as_deref(), Some("view payments"));
    }

    #[test]
    fn test_rechecks_current_session_on_each_call() {
        let (guard, _rx) = signed_in(&[], "staff");
        let mut wrapped = guard.guard(|_: ()| "ok", VIEW_PAYMENTS, None);
        assert!(wrapped.call(()).is_none());

        guard
            .session()
            .replace_principal(Principal::new("u@x.com", "staff", [VIEW_PAYMENTS]));
        assert_eq!(wrapped.call(()), Some("ok"));

        guard.session().sign_out();
        assert!(!wrapped.is_allowed());
    }

    #[test]
    fn test_admin_bypasses_guard() {
        let (guard, _rx) = signed_in(&[], "admin");
        let mut wrapped = guard.guard(|_: ()| 1, "anything", None);
        assert_eq!(wrapped.call(()), Some(1));
    }

    #[test]
    fn test_gate_render() {
        let (guard, _rx) = signed_in(&[VIEW_SALES], "staff");
        let gate = Gate::new(guard.session().clone());

        assert_eq!(gate.render(VIEW_SALES, || "sales table"), Some("sales table"));
        assert_eq!(gate.render(VIEW_PAYMENTS, || "payments"), None);
        assert_eq!(
            gate.render_or(VIEW_PAYMENTS, || "payments", || "no access"),
            "no access"
        );
    }
}
