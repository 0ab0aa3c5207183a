//! 组卷流程 - 流程层
//!
//! 核心职责：持有组卷页面的全部状态，串联整个流程
//!
//! 流程顺序：
//! 1. mount：并发加载题库和学科
//! 2. 筛选 → 勾选题目 → 填写抬头
//! 3. generate：生成文档描述 → 渲染 → 清空已选题目
//!
//! 状态只通过 `&mut self` 修改，由单个任务持有。

use crate::clients::BankApi;
use crate::error::AppResult;
use crate::models::{Discipline, ExamMetadata, ExamPlan, FilterState, Question, QuestionId, SessionUser};
use crate::services::composer::{self, ExamDocument};
use crate::services::renderer::{DocumentRenderer, RenderedExam};
use crate::services::{filter_questions, BankFetcher, FacetOptions, FetchFailure, SelectionSet};
use tracing::{info, warn};

/// 组卷页面状态
pub struct ExamBuilder<A, R> {
    fetcher: BankFetcher<A>,
    renderer: R,
    session: SessionUser,
    bank: Vec<Question>,
    disciplines: Vec<Discipline>,
    failures: Vec<FetchFailure>,
    filter: FilterState,
    metadata: ExamMetadata,
    selection: SelectionSet,
}

impl<A: BankApi, R: DocumentRenderer> ExamBuilder<A, R> {
    pub fn new(api: A, renderer: R, session: SessionUser) -> Self {
        Self {
            fetcher: BankFetcher::new(api),
            renderer,
            session,
            bank: Vec::new(),
            disciplines: Vec::new(),
            failures: Vec::new(),
            filter: FilterState::default(),
            metadata: ExamMetadata::default(),
            selection: SelectionSet::new(),
        }
    }

    /// 页面挂载：加载题库和学科
    ///
    /// # 返回
    /// 加载失败的请求（为空表示全部成功）
    pub async fn mount(&mut self) -> &[FetchFailure] {
        let snapshot = self.fetcher.load(&self.session).await;
        self.bank = snapshot.questions;
        self.disciplines = snapshot.disciplines;
        self.failures = snapshot.failures;
        &self.failures
    }

    pub fn is_loading(&self) -> bool {
        self.fetcher.questions_loading() || self.fetcher.disciplines_loading()
    }

    pub fn bank(&self) -> &[Question] {
        &self.bank
    }

    pub fn disciplines(&self) -> &[Discipline] {
        &self.disciplines
    }

    pub fn failures(&self) -> &[FetchFailure] {
        &self.failures
    }

    // ========== 筛选 ==========

    /// 当前可见的题目
    pub fn visible(&self) -> Vec<&Question> {
        filter_questions(&self.bank, &self.filter)
    }

    pub fn facet_options(&self) -> FacetOptions {
        FacetOptions::from_bank(&self.bank, &self.disciplines)
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: FilterState) {
        self.filter = filter;
    }

    pub fn reset_filters(&mut self) {
        self.filter.reset();
    }

    // ========== 选题 ==========

    /// 切换选中状态，返回切换后是否选中
    pub fn toggle(&mut self, id: &QuestionId) -> bool {
        self.selection.toggle(id, &self.bank)
    }

    pub fn remove(&mut self, id: &QuestionId) -> bool {
        self.selection.remove(id)
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    // ========== 抬头 ==========

    pub fn metadata(&self) -> &ExamMetadata {
        &self.metadata
    }

    pub fn set_metadata(&mut self, metadata: ExamMetadata) {
        self.metadata = metadata;
    }

    /// 按组卷计划设置筛选、抬头并依次勾选题目
    ///
    /// # 返回
    /// 题库中找不到的题目 ID
    pub fn apply_plan(&mut self, plan: ExamPlan) -> Vec<QuestionId> {
        self.filter = plan.filters;
        self.metadata = plan.metadata;

        let mut missing = Vec::new();
        for id in &plan.selected {
            if self.selection.contains(id) {
                continue;
            }
            if !self.selection.toggle(id, &self.bank) {
                warn!("⚠️ 题库中没有题目 {}", id);
                missing.push(id.clone());
            }
        }
        missing
    }

    // ========== 生成 ==========

    /// 生成文档描述（不渲染）
    pub fn compose(&self) -> AppResult<ExamDocument> {
        composer::compose(&self.selection, &self.metadata, &self.filter)
    }

    /// 生成试卷
    ///
    /// 未选题目时直接返回错误，不调用渲染器；成功后清空已选题目。
    pub async fn generate(&mut self, file_stem: &str) -> AppResult<RenderedExam> {
        let doc = self.compose()?;

        info!("📄 正在生成试卷，共 {} 道题目", self.selection.len());
        let rendered = self.renderer.render(&doc, file_stem).await?;

        self.selection.clear();
        Ok(rendered)
    }
}
