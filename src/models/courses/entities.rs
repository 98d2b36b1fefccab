use serde::{Deserialize, Serialize};

// 开课院系
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Department {
    #[serde(rename = "CS")]
    ComputerScience,
    #[serde(rename = "AI")]
    ArtificialIntelligence,
    #[serde(rename = "FIN")]
    Finance,
    #[serde(rename = "MKT")]
    Marketing,
    #[serde(rename = "MGMT")]
    Management,
    #[serde(rename = "IT")]
    InformationTechnology,
}

impl Department {
    pub fn code(&self) -> &'static str {
        match self {
            Department::ComputerScience => "CS",
            Department::ArtificialIntelligence => "AI",
            Department::Finance => "FIN",
            Department::Marketing => "MKT",
            Department::Management => "MGMT",
            Department::InformationTechnology => "IT",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Department::ComputerScience => "Computer Science",
            Department::ArtificialIntelligence => "Artificial Intelligence",
            Department::Finance => "Finance",
            Department::Marketing => "Marketing",
            Department::Management => "Management",
            Department::InformationTechnology => "Information Technology",
        }
    }
}

impl std::fmt::Display for Department {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for Department {
    type Err = String;

    // 院系筛选大小写不敏感
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "CS" => Ok(Department::ComputerScience),
            "AI" => Ok(Department::ArtificialIntelligence),
            "FIN" => Ok(Department::Finance),
            "MKT" => Ok(Department::Marketing),
            "MGMT" => Ok(Department::Management),
            "IT" => Ok(Department::InformationTechnology),
            _ => Err(format!("Invalid department: {s}")),
        }
    }
}

// 课程实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub id: i64,
    pub title: String,
    pub department: Option<Department>,
    pub description: Option<String>,
    // 授课教师，教师账户被删除后置空
    pub instructor_id: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_department_case_insensitive() {
        assert_eq!(
            Department::from_str("cs").unwrap(),
            Department::ComputerScience
        );
        assert_eq!(
            Department::from_str("Mgmt").unwrap(),
            Department::Management
        );
    }

    #[test]
    fn test_department_unknown() {
        assert!(Department::from_str("PHYS").is_err());
    }

    #[test]
    fn test_department_code_round_trip() {
        for dept in [
            Department::ComputerScience,
            Department::ArtificialIntelligence,
            Department::Finance,
            Department::Marketing,
            Department::Management,
            Department::InformationTechnology,
        ] {
            assert_eq!(Department::from_str(dept.code()).unwrap(), dept);
        }
    }
}
