// lib/src/navigation.rs

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::errors::LifeFlowError;

/// Named destinations of the app. Paths carry no parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Landing,
    Dashboard,
    Login,
    Signup,
    Profile,
    RequestBlood,
    DonateBlood,
}

// (path, title), indexed by discriminant.
const SCREENS: [(&str, &str); 7] = [
    ("/", "LifeFlow"),
    ("/dashboard", "Dashboard"),
    ("/login", "Sign In"),
    ("/signup", "Create Account"),
    ("/profile", "My Profile"),
    ("/request-blood", "Request Blood"),
    ("/donate-blood", "Donate Blood"),
];

impl Screen {
    pub const ALL: [Screen; 7] = [
        Screen::Landing,
        Screen::Dashboard,
        Screen::Login,
        Screen::Signup,
        Screen::Profile,
        Screen::RequestBlood,
        Screen::DonateBlood,
    ];

    pub fn path(self) -> &'static str {
        SCREENS[self as usize].0
    }

    pub fn title(self) -> &'static str {
        SCREENS[self as usize].1
    }

    pub fn from_path(path: &str) -> Option<Screen> {
        let trimmed = path.trim_end_matches('/');
        let path = if trimmed.is_empty() { "/" } else { trimmed };
        Self::ALL.iter().copied().find(|screen| screen.path() == path)
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for Screen {
    type Err = LifeFlowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Screen::from_path(s).ok_or_else(|| LifeFlowError::NotFound(format!("screen {}", s)))
    }
}

impl Serialize for Screen {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.path())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScreenEntry {
    pub path: &'static str,
    pub title: &'static str,
}

pub fn screen_table() -> Vec<ScreenEntry> {
    Screen::ALL
        .iter()
        .map(|screen| ScreenEntry {
            path: screen.path(),
            title: screen.title(),
        })
        .collect()
}

/// A labelled action that leads to a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CallToAction {
    pub label: &'static str,
    pub target: Screen,
}

/// Every action on the landing page asks the visitor to sign in first.
pub const LANDING_ACTIONS: [CallToAction; 4] = [
    CallToAction { label: "Sign In", target: Screen::Login },
    CallToAction { label: "Donate Now", target: Screen::Login },
    CallToAction { label: "Request Blood", target: Screen::Login },
    CallToAction { label: "Get Started", target: Screen::Login },
];

/// Receives the navigation side effect of a completed action.
#[cfg_attr(test, mockall::automock)]
pub trait Navigator: Send + Sync {
    fn navigate(&self, screen: Screen);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn should_give_every_screen_a_distinct_path() {
        let paths: HashSet<_> = Screen::ALL.iter().map(|screen| screen.path()).collect();
        assert_eq!(paths.len(), Screen::ALL.len());
    }

    #[test]
    fn should_resolve_paths_back_to_screens() {
        for screen in Screen::ALL {
            assert_eq!(Screen::from_path(screen.path()), Some(screen));
        }
        assert_eq!(Screen::from_path("/dashboard/"), Some(Screen::Dashboard));
        assert_eq!(Screen::from_path(""), Some(Screen::Landing));
        assert_eq!(Screen::from_path("/admin"), None);
    }

    #[test]
    fn should_send_landing_actions_to_login() {
        assert!(LANDING_ACTIONS.iter().all(|action| action.target == Screen::Login));
    }

    #[test]
    fn should_serialize_as_path() {
        assert_eq!(serde_json::to_string(&Screen::RequestBlood).unwrap(), "\"/request-blood\"");
    }
}
