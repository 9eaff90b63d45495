// src/evaluation/group.rs

use std::{
    cmp::Ordering,
    collections::{BTreeMap, HashMap, hash_map::Entry},
    fmt,
    str::FromStr,
};

use serde::{Deserialize, Serialize, Serializer};

use super::{collate, round_half_up, score_card};
use crate::models::{member::Member, response::RespondentRecord};

/// Label of the bucket for members without a farmer group.
pub const UNGROUPED_LABEL: &str = "Ungrouped";

/// Which submission wins when a member has several for the same query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DuplicatePolicy {
    /// First record in store order.
    #[default]
    #[serde(rename = "first", alias = "keep_first")]
    KeepFirst,
    /// Record with the newest `submitted_at`; untimestamped records are oldest.
    #[serde(rename = "latest", alias = "keep_latest")]
    KeepLatest,
}

impl FromStr for DuplicatePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "first" | "keep_first" => Ok(DuplicatePolicy::KeepFirst),
            "latest" | "keep_latest" => Ok(DuplicatePolicy::KeepLatest),
            other => Err(format!("unknown duplicate policy '{}'", other)),
        }
    }
}

/// Farmer-group key. `Ungrouped` always sorts after every named group; a group
/// literally named like the sentinel (any case) is folded into it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GroupKey {
    Named(String),
    Ungrouped,
}

impl GroupKey {
    pub fn from_kelompok(kelompok: Option<&str>) -> Self {
        match kelompok.map(str::trim) {
            Some(name) if !name.is_empty() && !name.eq_ignore_ascii_case(UNGROUPED_LABEL) => {
                GroupKey::Named(name.to_string())
            }
            _ => GroupKey::Ungrouped,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            GroupKey::Named(name) => name,
            GroupKey::Ungrouped => UNGROUPED_LABEL,
        }
    }
}

impl Ord for GroupKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (GroupKey::Named(a), GroupKey::Named(b)) => collate(a, b),
            (GroupKey::Named(_), GroupKey::Ungrouped) => Ordering::Less,
            (GroupKey::Ungrouped, GroupKey::Named(_)) => Ordering::Greater,
            (GroupKey::Ungrouped, GroupKey::Ungrouped) => Ordering::Equal,
        }
    }
}

impl PartialOrd for GroupKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for GroupKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GroupStatus {
    #[serde(rename = "No respondents")]
    NoRespondents,
    #[serde(rename = "All responded")]
    AllResponded,
    #[serde(rename = "Partially responded")]
    PartiallyResponded,
}

impl GroupStatus {
    fn from_counts(respondents: usize, members: usize) -> Self {
        if respondents == 0 {
            GroupStatus::NoRespondents
        } else if respondents == members {
            GroupStatus::AllResponded
        } else {
            GroupStatus::PartiallyResponded
        }
    }
}

/// Evaluation row for one member inside a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberResult {
    pub user_id: i64,
    pub nama: String,
    pub username: String,
    pub has_response: bool,
    pub score: u8,
    pub answered_count: usize,
    pub response_id: Option<i64>,
}

impl MemberResult {
    fn display_name(&self) -> &str {
        if self.nama.trim().is_empty() {
            &self.username
        } else {
            &self.nama
        }
    }
}

/// Per-group statistics, recomputed on every query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSummary {
    pub group_key: GroupKey,
    pub member_count: usize,
    pub respondent_count: usize,
    pub total_score: u64,
    pub average_score: u8,
    pub completion_percent: u8,
    pub status: GroupStatus,
    pub members: Vec<MemberResult>,
}

/// Folds member scores into sorted per-group summaries.
///
/// Groups come out alphabetically with the ungrouped bucket last. Inside a
/// group, respondents precede non-respondents and are ranked by score.
pub fn aggregate(
    members: &[Member],
    responses: &[RespondentRecord],
    policy: DuplicatePolicy,
) -> Vec<GroupSummary> {
    let chosen = select_responses(responses, policy);

    let mut groups: BTreeMap<GroupKey, Vec<MemberResult>> = BTreeMap::new();
    for member in members {
        let key = GroupKey::from_kelompok(member.kelompok.as_deref());
        let result = evaluate_member(member, chosen.get(&member.id).copied());
        groups.entry(key).or_default().push(result);
    }

    groups
        .into_iter()
        .map(|(key, mut results)| {
            results.sort_by(compare_members);
            summarize(key, results)
        })
        .collect()
}

fn select_responses(
    responses: &[RespondentRecord],
    policy: DuplicatePolicy,
) -> HashMap<i64, &RespondentRecord> {
    let mut chosen: HashMap<i64, &RespondentRecord> = HashMap::new();

    for record in responses {
        match chosen.entry(record.user_id) {
            Entry::Vacant(slot) => {
                slot.insert(record);
            }
            Entry::Occupied(mut slot) => {
                let replace = policy == DuplicatePolicy::KeepLatest
                    && record.submitted_at > slot.get().submitted_at;
                let kept = if replace { record.id } else { slot.get().id };
                tracing::debug!(user_id = record.user_id, kept, "Duplicate response for member");
                if replace {
                    slot.insert(record);
                }
            }
        }
    }

    chosen
}

fn evaluate_member(member: &Member, response: Option<&RespondentRecord>) -> MemberResult {
    let has_response = response.is_some_and(|r| !r.answers.is_empty());
    let card = match response {
        Some(r) if has_response => score_card(&r.answers),
        _ => Default::default(),
    };

    MemberResult {
        user_id: member.id,
        nama: member.nama.clone(),
        username: member.username.clone(),
        has_response,
        score: card.score,
        answered_count: card.answered_count,
        response_id: response.map(|r| r.id),
    }
}

fn compare_members(a: &MemberResult, b: &MemberResult) -> Ordering {
    b.has_response
        .cmp(&a.has_response)
        .then_with(|| {
            if a.has_response {
                b.score.cmp(&a.score)
            } else {
                Ordering::Equal
            }
        })
        .then_with(|| collate(a.display_name(), b.display_name()))
        .then_with(|| a.user_id.cmp(&b.user_id))
}

fn summarize(group_key: GroupKey, members: Vec<MemberResult>) -> GroupSummary {
    let member_count = members.len();
    let respondents: Vec<&MemberResult> = members.iter().filter(|m| m.has_response).collect();
    let respondent_count = respondents.len();
    let total_score: u64 = respondents.iter().map(|m| u64::from(m.score)).sum();

    let average_score = if respondent_count == 0 {
        0
    } else {
        round_half_up(total_score as f64 / respondent_count as f64)
    };

    let completion_percent = if member_count == 0 {
        0
    } else {
        round_half_up(100.0 * respondent_count as f64 / member_count as f64)
    };

    GroupSummary {
        group_key,
        member_count,
        respondent_count,
        total_score,
        average_score: average_score.clamp(0, 100) as u8,
        completion_percent: completion_percent.clamp(0, 100) as u8,
        status: GroupStatus::from_counts(respondent_count, member_count),
        members,
    }
}
