//! 账户类型选择、登录、注册与登出

use creator_shared::error::Result;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use super::AppStateStore;
use crate::account::{LoginForm, SignupForm, handle, local_part};
use crate::ledger::EngagementLedger;
use crate::models::{AccountType, Screen, Section, UserProfile};

impl AppStateStore {
    /// 选择账户类型后进入登录页
    pub fn select_account_type(&mut self, account_type: AccountType) {
        self.account_type = Some(account_type);
        self.user.account_type = Some(account_type);
        self.screen = Screen::Login;
        self.touch();
    }

    /// 登录
    ///
    /// 表单校验失败时返回错误且不修改任何状态。
    pub fn login(&mut self, form: &LoginForm) -> Result<()> {
        form.validate()?;

        let name = local_part(&form.email).to_string();
        self.user.email = form.email.clone();
        self.user.username = handle(&name);
        self.user.name = name;
        self.user.id = Some(new_user_id());

        info!(user_id = ?self.user.id, "用户登录");
        self.enter_dashboard();
        Ok(())
    }

    /// 注册
    pub fn signup(&mut self, form: &SignupForm) -> Result<()> {
        form.validate()?;

        self.user.name = form.full_name.clone();
        self.user.email = form.email.clone();
        self.user.username = handle(&form.username);
        self.user.id = Some(new_user_id());

        info!(user_id = ?self.user.id, "用户注册");
        self.enter_dashboard();
        Ok(())
    }

    /// 跳过欢迎页，以创作者身份进入演示数据
    pub fn skip_welcome(&mut self) {
        self.account_type = Some(AccountType::Creator);
        self.user.account_type = Some(AccountType::Creator);
        self.enter_dashboard();
    }

    fn enter_dashboard(&mut self) {
        self.seed_demo_data();
        self.screen = Screen::Dashboard;
        self.touch();
    }

    /// 登出：删除快照并回到初始状态
    pub fn logout(&mut self) {
        if let Err(e) = self.clear_saved_state() {
            warn!(error = %e, "删除快照失败");
        }

        self.verification.cancel();
        self.user = UserProfile {
            join_date: self.clock.now(),
            ..UserProfile::default()
        };
        self.account_type = None;
        self.ledger = EngagementLedger::new();
        self.courses.clear();
        self.students.clear();
        self.notifications.clear();
        self.rewards.clear();
        self.screen = Screen::Welcome;
        self.section = Section::Dashboard;
        self.refresh_eligibility();
        self.dirty = false;

        info!("用户已登出");
    }

    pub fn is_logged_in(&self) -> bool {
        self.user.id.is_some()
    }
}

fn new_user_id() -> String {
    Uuid::now_v7().to_string()
}
