//! 自定义断言宏和辅助函数

use creator_core::AppStateStore;

/// 断言粉丝已转化为学员
#[macro_export]
macro_rules! assert_student {
    ($store:expr, $follower_id:expr) => {
        let record = $store
            .follower($follower_id)
            .unwrap_or_else(|| panic!("台账中没有粉丝 {}", $follower_id));
        assert!(record.is_student, "粉丝 {} 应该已转化", $follower_id);
        assert!(
            $store
                .find_student(&format!("student_{}", $follower_id))
                .is_some(),
            "应存在学员记录 student_{}",
            $follower_id
        );
    };
}

/// 断言粉丝尚未转化
#[macro_export]
macro_rules! assert_not_student {
    ($store:expr, $follower_id:expr) => {
        let is_student = $store
            .follower($follower_id)
            .is_some_and(|record| record.is_student);
        assert!(!is_student, "粉丝 {} 不应该已转化", $follower_id);
    };
}

/// 断言聚合状态内部一致
///
/// - 转化学员数等于台账中已转化的粉丝数
/// - 奖励积分等于奖励历史之和
/// - 学员数不小于转化学员数
/// - 课程数与课程列表一致
/// - 变现资格与当前门槛一致
/// - 通知不超过容量
pub fn assert_profile_consistent(store: &AppStateStore) {
    let user = store.user();

    assert_eq!(
        user.converted_students,
        store.ledger().converted_count() as u64,
        "转化学员数与台账不一致"
    );
    let history_points: u64 = store
        .reward_history()
        .iter()
        .map(|r| u64::from(r.points))
        .sum();
    assert_eq!(user.reward_points, history_points, "奖励积分与奖励历史不一致");
    assert!(user.students >= user.converted_students);
    assert_eq!(user.courses, store.courses().len() as u64, "课程数不一致");
    assert_eq!(
        user.is_monetization_eligible,
        store.eligibility().eligible,
        "变现资格未刷新"
    );
    assert!(store.notifications().len() <= store.engine_config().notification_capacity);
}
