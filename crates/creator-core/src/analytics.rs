//! 统计与展示格式化

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::UserProfile;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    pub total_earnings: f64,
    /// 互动率百分比，保留一位小数
    pub engagement_rate: f64,
    /// 转化率百分比，保留一位小数
    pub conversion_rate: f64,
}

impl AnalyticsSummary {
    pub fn from_user(user: &UserProfile) -> Self {
        Self {
            total_earnings: user.total_earnings,
            engagement_rate: engagement_rate(user),
            conversion_rate: conversion_rate(user),
        }
    }
}

fn percent_of_followers(value: u64, followers: u64) -> f64 {
    if followers == 0 {
        return 0.0;
    }
    round1(value as f64 / followers as f64 * 100.0)
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub fn engagement_rate(user: &UserProfile) -> f64 {
    percent_of_followers(user.total_engagements, user.followers)
}

pub fn conversion_rate(user: &UserProfile) -> f64 {
    percent_of_followers(user.converted_students, user.followers)
}

/// 紧凑数字：>= 1000 显示为 1.2k
pub fn format_compact(value: u64) -> String {
    if value >= 1000 {
        format!("{:.1}k", value as f64 / 1000.0)
    } else {
        value.to_string()
    }
}

/// 相对时间标签
pub fn time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - then).num_seconds().max(0);

    fn plural(n: i64, unit: &str) -> String {
        if n == 1 {
            format!("{n} {unit} ago")
        } else {
            format!("{n} {unit}s ago")
        }
    }

    match seconds {
        s if s < 60 => "Just now".to_string(),
        s if s < 3_600 => format!("{} min ago", s / 60),
        s if s < 86_400 => plural(s / 3_600, "hour"),
        s if s < 2_592_000 => plural(s / 86_400, "day"),
        s if s < 31_536_000 => plural(s / 2_592_000, "month"),
        s => plural(s / 31_536_000, "year"),
    }
}
