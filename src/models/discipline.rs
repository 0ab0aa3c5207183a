use serde::{Deserialize, Serialize};

/// 学科
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discipline {
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
}

/// 教师-学科关联记录（后端 ProfessorDisciplina）
///
/// 只关心内嵌的学科对象，其余字段忽略。
#[derive(Debug, Clone, Deserialize)]
pub struct ProfessorDiscipline {
    #[serde(rename = "disciplina")]
    pub discipline: Discipline,
}

impl From<ProfessorDiscipline> for Discipline {
    fn from(link: ProfessorDiscipline) -> Self {
        link.discipline
    }
}

/// 把关联列表展开为学科列表
pub fn unwrap_links(links: Vec<ProfessorDiscipline>) -> Vec<Discipline> {
    links.into_iter().map(Discipline::from).collect()
}
