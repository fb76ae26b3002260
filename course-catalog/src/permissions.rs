use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Account roles known to the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", try_from = "String")]
pub enum Role {
    Owner,
    Admin,
    Teacher,
    Student,
}

/// Dashboard operations gated by role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    ViewDashboard,
    ManageCategories,
    ManageLevels,
    ManageCourses,
    ManageSubjects,
    ManagePlans,
    ManageSubscriptions,
    ViewPayments,
    ManageTeachers,
    ManageUsers,
    ManageRoles,
}

const OWNER: &[Permission] = &[
    Permission::ViewDashboard,
    Permission::ManageCategories,
    Permission::ManageLevels,
    Permission::ManageCourses,
    Permission::ManageSubjects,
    Permission::ManagePlans,
    Permission::ManageSubscriptions,
    Permission::ViewPayments,
    Permission::ManageTeachers,
    Permission::ManageUsers,
    Permission::ManageRoles,
];

const ADMIN: &[Permission] = &[
    Permission::ViewDashboard,
    Permission::ManageCategories,
    Permission::ManageLevels,
    Permission::ManageCourses,
    Permission::ManageSubjects,
    Permission::ManagePlans,
    Permission::ManageSubscriptions,
    Permission::ViewPayments,
    Permission::ManageTeachers,
    Permission::ManageUsers,
];

const TEACHER: &[Permission] = &[
    Permission::ViewDashboard,
    Permission::ManageCourses,
    Permission::ManageSubjects,
];

impl Role {
    /// Everything this role may do
    pub fn permissions(&self) -> &'static [Permission] {
        match self {
            Role::Owner => OWNER,
            Role::Admin => ADMIN,
            Role::Teacher => TEACHER,
            Role::Student => &[],
        }
    }

    pub fn can(&self, permission: Permission) -> bool {
        self.permissions().contains(&permission)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Owner => "OWNER",
            Role::Admin => "ADMIN",
            Role::Teacher => "TEACHER",
            Role::Student => "STUDENT",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq)]
#[error("Unknown role: {0}")]
pub struct UnknownRole(pub String);

impl TryFrom<String> for Role {
    type Error = UnknownRole;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "owner" => Ok(Role::Owner),
            "admin" => Ok(Role::Admin),
            "teacher" => Ok(Role::Teacher),
            "student" | "user" => Ok(Role::Student),
            _ => Err(UnknownRole(s.to_string())),
        }
    }
}
