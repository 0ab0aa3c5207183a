//! 表单校验 - 业务能力层
//!
//! 学科管理、用户管理和修改密码在提交前的本地校验。

use crate::error::{AppError, AppResult, BusinessError};
use crate::models::{Discipline, SessionUser, UserRegistration};
use regex::Regex;
use tracing::debug;

const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";

// ========== 学科 ==========

/// 校验新学科名称
///
/// # 返回
/// 去掉首尾空白后的名称
pub fn new_discipline_name(name: &str, existing: &[Discipline]) -> AppResult<String> {
    let name = discipline_name(name)?;
    let folded = name.to_lowercase();

    if existing.iter().any(|d| d.name.trim().to_lowercase() == folded) {
        return Err(BusinessError::DuplicateDiscipline { name }.into());
    }

    Ok(name)
}

/// 校验学科名称（重命名时使用）
pub fn discipline_name(name: &str) -> AppResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::invalid_field("name", "学科名称不能为空"));
    }
    Ok(name.to_string())
}

// ========== 用户 ==========

/// 邮箱格式是否合法
pub fn is_valid_email(email: &str) -> AppResult<bool> {
    let re = Regex::new(EMAIL_PATTERN)?;
    Ok(re.is_match(email))
}

/// 校验姓名和邮箱
pub fn profile(name: &str, email: &str) -> AppResult<(String, String)> {
    let name = name.trim();
    let email = email.trim();

    if name.is_empty() {
        return Err(AppError::invalid_field("name", "姓名不能为空"));
    }
    if email.is_empty() {
        return Err(AppError::invalid_field("email", "邮箱不能为空"));
    }
    if !is_valid_email(email)? {
        return Err(AppError::invalid_field("email", format!("邮箱格式不正确: {}", email)));
    }

    Ok((name.to_string(), email.to_string()))
}

/// 校验管理员提交的用户表单
///
/// 只有教师可以关联学科，管理员的学科列表会被清空。
pub fn registration(form: UserRegistration) -> AppResult<UserRegistration> {
    let (name, email) = profile(&form.name, &form.email)?;

    let discipline_ids = if form.role.is_admin() {
        if !form.discipline_ids.is_empty() {
            debug!("管理员账号不关联学科，忽略 {:?}", form.discipline_ids);
        }
        Vec::new()
    } else {
        form.discipline_ids
    };

    Ok(UserRegistration {
        name,
        email,
        role: form.role,
        discipline_ids,
    })
}

/// 管理员不能删除自己
pub fn deletion_target(target_id: i64, admin: &SessionUser) -> AppResult<()> {
    if target_id == admin.id {
        return Err(BusinessError::SelfDeletion.into());
    }
    Ok(())
}

/// 校验修改密码表单
pub fn password_change(current: &str, new: &str) -> AppResult<()> {
    if current.is_empty() {
        return Err(AppError::invalid_field("current_password", "请输入当前密码"));
    }
    if new.is_empty() {
        return Err(AppError::invalid_field("new_password", "新密码不能为空"));
    }
    if new == current {
        return Err(AppError::invalid_field("new_password", "新密码不能与当前密码相同"));
    }
    Ok(())
}
