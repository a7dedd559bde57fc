//! Client-side route gate.
//!
//! One declarative table maps route prefixes to the roles allowed through;
//! one function evaluates it. This is a navigation boundary only — the
//! backend authorizes every call independently, so nothing here is a
//! security control.

use crate::types::Role;

/// The landing (login) route, always reachable.
pub const LANDING_ROUTE: &str = "/";

struct RouteRule {
    prefix: &'static str,
    allowed: &'static [Role],
}

/// L&D administration is Admin-only; the employee portal admits both roles.
const ROUTE_RULES: &[RouteRule] = &[
    RouteRule {
        prefix: "/l&d",
        allowed: &[Role::Admin],
    },
    RouteRule {
        prefix: "/employee",
        allowed: &[Role::Admin, Role::User],
    },
];

/// Outcome of a navigation check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Allow,
    RedirectToLanding,
}

/// Evaluate a navigation against the route table.
///
/// The landing route is always allowed. Everywhere else a missing role
/// redirects to landing; a present role passes unless a matching prefix
/// rule excludes it.
pub fn evaluate(path: &str, role: Option<Role>) -> GateDecision {
    if path == LANDING_ROUTE {
        return GateDecision::Allow;
    }

    let Some(role) = role else {
        return GateDecision::RedirectToLanding;
    };

    for rule in ROUTE_RULES {
        if path.starts_with(rule.prefix) {
            if rule.allowed.contains(&role) {
                return GateDecision::Allow;
            }
            return GateDecision::RedirectToLanding;
        }
    }

    GateDecision::Allow
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn landing_is_open_to_everyone() {
        assert_eq!(evaluate("/", None), GateDecision::Allow);
        assert_eq!(evaluate("/", Some(Role::User)), GateDecision::Allow);
    }

    #[test]
    fn missing_role_redirects_everywhere_else() {
        assert_eq!(evaluate("/employee", None), GateDecision::RedirectToLanding);
        assert_eq!(evaluate("/l&d/analytics", None), GateDecision::RedirectToLanding);
        assert_eq!(evaluate("/anything", None), GateDecision::RedirectToLanding);
    }

    #[test]
    fn admin_routes_exclude_plain_users() {
        assert_eq!(
            evaluate("/l&d", Some(Role::User)),
            GateDecision::RedirectToLanding
        );
        assert_eq!(
            evaluate("/l&d/training-requests", Some(Role::User)),
            GateDecision::RedirectToLanding
        );
        assert_eq!(evaluate("/l&d", Some(Role::Admin)), GateDecision::Allow);
    }

    #[test]
    fn employee_routes_admit_both_roles() {
        assert_eq!(evaluate("/employee", Some(Role::User)), GateDecision::Allow);
        assert_eq!(
            evaluate("/employee/learnings", Some(Role::Admin)),
            GateDecision::Allow
        );
    }

    #[test]
    fn unmatched_routes_pass_with_any_role() {
        assert_eq!(evaluate("/about", Some(Role::User)), GateDecision::Allow);
    }
}
