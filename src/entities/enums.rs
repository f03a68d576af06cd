//! Enumerations - the closed vocabularies stored as strings in the database

use serde::{Deserialize, Serialize};
use std::fmt;

// ********************* BLOOD TYPES **********************//

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BloodType {
    #[serde(rename = "A+")]
    APositive,
    #[serde(rename = "A-")]
    ANegative,
    #[serde(rename = "B+")]
    BPositive,
    #[serde(rename = "B-")]
    BNegative,
    #[serde(rename = "AB+")]
    AbPositive,
    #[serde(rename = "AB-")]
    AbNegative,
    #[serde(rename = "O+")]
    OPositive,
    #[serde(rename = "O-")]
    ONegative,
}

impl BloodType {
    pub const ALL: [BloodType; 8] = [
        BloodType::APositive,
        BloodType::ANegative,
        BloodType::BPositive,
        BloodType::BNegative,
        BloodType::AbPositive,
        BloodType::AbNegative,
        BloodType::OPositive,
        BloodType::ONegative,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BloodType::APositive => "A+",
            BloodType::ANegative => "A-",
            BloodType::BPositive => "B+",
            BloodType::BNegative => "B-",
            BloodType::AbPositive => "AB+",
            BloodType::AbNegative => "AB-",
            BloodType::OPositive => "O+",
            BloodType::ONegative => "O-",
        }
    }

    /// Exact match on the symbol (`"AB-"`), case-sensitive like the stored values.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == value)
    }

    /// Units below which stock of this type is a concern.
    pub fn critical_level(&self) -> i64 {
        match self {
            BloodType::ONegative => 20,
            BloodType::OPositive => 25,
            BloodType::ANegative => 15,
            BloodType::APositive => 20,
            BloodType::BNegative => 10,
            BloodType::BPositive => 15,
            BloodType::AbNegative => 8,
            BloodType::AbPositive => 10,
        }
    }

    /// Chart colour used by the donation trends widget
    pub fn chart_color(&self) -> &'static str {
        match self {
            BloodType::OPositive => "#FF6384",
            BloodType::APositive => "#36A2EB",
            BloodType::BPositive => "#FFCE56",
            BloodType::AbPositive => "#4BC0C0",
            BloodType::ONegative => "#9966FF",
            BloodType::ANegative => "#FF9F40",
            BloodType::BNegative => "#C9CBCF",
            BloodType::AbNegative => "#4BC0C0",
        }
    }
}

impl fmt::Display for BloodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Critical level for a stored blood type string; unknown types use 15.
pub fn critical_level_for(blood_type: &str) -> i64 {
    BloodType::parse(blood_type).map_or(15, |t| t.critical_level())
}

// ********************* USERS **********************//

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Donor,
    Hospital,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Donor => "donor",
            UserRole::Hospital => "hospital",
            UserRole::Admin => "admin",
        }
    }
}

// ********************* REQUESTS **********************//

/// Display metadata for an urgency level
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct UrgencyInfo {
    pub color: &'static str,
    pub priority: u8,
    pub text: &'static str,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyLevel {
    Emergency,
    Critical,
    High,
    Normal,
}

impl UrgencyLevel {
    /// Levels that make a request an emergency request
    pub const ESCALATED: [UrgencyLevel; 3] =
        [UrgencyLevel::High, UrgencyLevel::Critical, UrgencyLevel::Emergency];

    pub fn as_str(&self) -> &'static str {
        match self {
            UrgencyLevel::Emergency => "emergency",
            UrgencyLevel::Critical => "critical",
            UrgencyLevel::High => "high",
            UrgencyLevel::Normal => "normal",
        }
    }

    /// Anything unrecognised ranks as normal.
    pub fn parse(value: &str) -> Self {
        match value {
            "emergency" => UrgencyLevel::Emergency,
            "critical" => UrgencyLevel::Critical,
            "high" => UrgencyLevel::High,
            _ => UrgencyLevel::Normal,
        }
    }

    /// 1 is the most urgent
    pub fn priority(&self) -> u8 {
        match self {
            UrgencyLevel::Emergency => 1,
            UrgencyLevel::Critical => 2,
            UrgencyLevel::High => 3,
            UrgencyLevel::Normal => 4,
        }
    }

    pub fn info(&self) -> UrgencyInfo {
        let (color, text) = match self {
            UrgencyLevel::Emergency => ("danger", "EMERGENCY"),
            UrgencyLevel::Critical => ("warning", "CRITICAL"),
            UrgencyLevel::High => ("info", "HIGH"),
            UrgencyLevel::Normal => ("secondary", "NORMAL"),
        };
        UrgencyInfo {
            color,
            priority: self.priority(),
            text,
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct StatusInfo {
    pub color: &'static str,
    pub text: &'static str,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Accepted,
    Fulfilled,
    Cancelled,
}

impl RequestStatus {
    /// Anything unrecognised displays as pending.
    pub fn parse(value: &str) -> Self {
        match value {
            "accepted" => RequestStatus::Accepted,
            "fulfilled" => RequestStatus::Fulfilled,
            "cancelled" => RequestStatus::Cancelled,
            _ => RequestStatus::Pending,
        }
    }

    pub fn info(&self) -> StatusInfo {
        let (color, text) = match self {
            RequestStatus::Pending => ("warning", "Pending"),
            RequestStatus::Accepted => ("info", "Accepted"),
            RequestStatus::Fulfilled => ("success", "Fulfilled"),
            RequestStatus::Cancelled => ("secondary", "Cancelled"),
        };
        StatusInfo { color, text }
    }
}

// ********************* APPOINTMENTS **********************//

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Scheduled,
    Confirmed,
    Completed,
    Cancelled,
    Rescheduled,
    NoShow,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "scheduled",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
            AppointmentStatus::Rescheduled => "rescheduled",
            AppointmentStatus::NoShow => "no_show",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "scheduled" => Some(AppointmentStatus::Scheduled),
            "confirmed" => Some(AppointmentStatus::Confirmed),
            "completed" => Some(AppointmentStatus::Completed),
            "cancelled" => Some(AppointmentStatus::Cancelled),
            "rescheduled" => Some(AppointmentStatus::Rescheduled),
            "no_show" => Some(AppointmentStatus::NoShow),
            _ => None,
        }
    }

    pub fn badge_class(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "badge-primary",
            AppointmentStatus::Confirmed => "badge-success",
            AppointmentStatus::Completed => "badge-secondary",
            AppointmentStatus::Cancelled => "badge-danger",
            AppointmentStatus::Rescheduled => "badge-warning",
            AppointmentStatus::NoShow => "badge-dark",
        }
    }

    /// Closed appointments never count as upcoming, whatever their date.
    pub fn is_closed(&self) -> bool {
        matches!(
            self,
            AppointmentStatus::Completed | AppointmentStatus::Cancelled | AppointmentStatus::NoShow
        )
    }
}

// ********************* INVENTORY HISTORY **********************//

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ActionInfo {
    pub icon: &'static str,
    pub color: &'static str,
    pub text: &'static str,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HistoryAction {
    Add,
    Subtract,
    Set,
    Expired,
    Transfer,
}

impl HistoryAction {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "add" => Some(HistoryAction::Add),
            "subtract" => Some(HistoryAction::Subtract),
            "set" => Some(HistoryAction::Set),
            "expired" => Some(HistoryAction::Expired),
            "transfer" => Some(HistoryAction::Transfer),
            _ => None,
        }
    }

    pub fn info(&self) -> ActionInfo {
        let (icon, color, text) = match self {
            HistoryAction::Add => ("fa-plus", "success", "Added"),
            HistoryAction::Subtract => ("fa-minus", "warning", "Removed"),
            HistoryAction::Set => ("fa-edit", "info", "Updated"),
            HistoryAction::Expired => ("fa-clock", "danger", "Expired"),
            HistoryAction::Transfer => ("fa-exchange-alt", "primary", "Transferred"),
        };
        ActionInfo { icon, color, text }
    }

    /// Display info for a stored action string; unknown actions look like `set`.
    pub fn info_for(value: &str) -> ActionInfo {
        Self::parse(value).unwrap_or(HistoryAction::Set).info()
    }
}

// ********************* STOCK LEVELS **********************//

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StockStatus {
    Critical,
    Low,
    Good,
}

impl StockStatus {
    /// Critical at or below 30% of the critical level, low at or below 60%.
    pub fn classify(quantity: i64, critical_level: i64) -> Self {
        if quantity * 10 <= critical_level * 3 {
            StockStatus::Critical
        } else if quantity * 10 <= critical_level * 6 {
            StockStatus::Low
        } else {
            StockStatus::Good
        }
    }
}
