use serde::Serialize;

use crate::session::resolver::Role;

/// One sidebar entry. `exact` marks entries that should only highlight on
/// an exact path match (the role home, which every other path extends).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    pub path: &'static str,
    pub label: &'static str,
    pub exact: bool,
}

impl MenuItem {
    const fn new(path: &'static str, label: &'static str, exact: bool) -> Self {
        Self { path, label, exact }
    }
}

/// Sidebar entries for the role. Profile and logout are rendered from the
/// sidebar footer, not from this list.
pub fn menu_for(role: Role) -> Vec<MenuItem> {
    match role {
        Role::Admin => vec![
            MenuItem::new("/admin", "Home", true),
            MenuItem::new("/admin/careers", "Careers", false),
            MenuItem::new("/admin/payments", "Payments", false),
            MenuItem::new("/admin/news", "News", false),
            MenuItem::new("/admin/users", "Users", false),
        ],
        Role::Student => vec![
            MenuItem::new("/student", "Home", true),
            MenuItem::new("/student/careers", "My careers", false),
            MenuItem::new("/student/payments", "My payments", false),
            MenuItem::new("/student/news", "News", false),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_menu_includes_user_management() {
        let menu = menu_for(Role::Admin);
        assert!(menu.iter().any(|item| item.path == "/admin/users"));
        assert!(menu.iter().all(|item| item.path.starts_with("/admin")));
    }

    #[test]
    fn test_student_menu_stays_in_student_routes() {
        let menu = menu_for(Role::Student);
        assert!(menu.iter().all(|item| item.path.starts_with("/student")));
        assert!(!menu.iter().any(|item| item.path.contains("users")));
    }

    #[test]
    fn test_only_the_home_entry_is_exact() {
        for role in [Role::Admin, Role::Student] {
            let menu = menu_for(role);
            let exact: Vec<_> = menu.iter().filter(|item| item.exact).collect();
            assert_eq!(exact.len(), 1);
            assert_eq!(exact[0].path, role.home_path());
        }
    }
}
