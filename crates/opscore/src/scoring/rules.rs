use serde::Serialize;

use super::record::Record;

/// Increment a fired rule contributes to the running total.
struct Contribution {
    weight: f64,
    note: Option<String>,
}

type RuleEval = Box<dyn Fn(&Record) -> Option<Contribution> + Send + Sync>;

/// Single named condition → increment entry in a rule table.
pub struct Rule {
    name: &'static str,
    eval: RuleEval,
}

impl Rule {
    /// Fixed increment applied when the predicate holds.
    pub fn when<P>(name: &'static str, weight: f64, predicate: P) -> Self
    where
        P: Fn(&Record) -> bool + Send + Sync + 'static,
    {
        Self {
            name,
            eval: Box::new(move |record| {
                predicate(record).then(|| Contribution { weight, note: None })
            }),
        }
    }

    /// Fixed increment with a human-readable note rendered from the record.
    pub fn when_noted<P, N>(name: &'static str, weight: f64, predicate: P, note: N) -> Self
    where
        P: Fn(&Record) -> bool + Send + Sync + 'static,
        N: Fn(&Record) -> String + Send + Sync + 'static,
    {
        Self {
            name,
            eval: Box::new(move |record| {
                predicate(record).then(|| Contribution {
                    weight,
                    note: Some(note(record)),
                })
            }),
        }
    }

    /// Variable increment computed from the record; zero means no hit.
    pub fn scaled<F>(name: &'static str, contribution: F) -> Self
    where
        F: Fn(&Record) -> f64 + Send + Sync + 'static,
    {
        Self {
            name,
            eval: Box::new(move |record| {
                let weight = contribution(record);
                (weight != 0.0).then_some(Contribution { weight, note: None })
            }),
        }
    }
}

/// Ordered, named rule table with clamped accumulation bounds.
pub struct RuleTable {
    name: &'static str,
    lower: f64,
    upper: f64,
    rules: Vec<Rule>,
}

impl RuleTable {
    pub fn new(name: &'static str, lower: f64, upper: f64) -> Self {
        Self {
            name,
            lower,
            upper,
            rules: Vec::new(),
        }
    }

    /// Table bounded to [0, 1] (risk and probability style scores).
    pub fn unit(name: &'static str) -> Self {
        Self::new(name, 0.0, 1.0)
    }

    /// Table bounded to [0, 100] (point style scores).
    pub fn percent(name: &'static str) -> Self {
        Self::new(name, 0.0, 100.0)
    }

    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Sum the increments of every rule whose condition holds, clamped to the
    /// table bounds. Pure; a record missing every field scores the lower bound.
    pub fn evaluate(&self, record: &Record) -> ScoreCard {
        let mut total = 0.0;
        let mut hits = Vec::new();

        for rule in &self.rules {
            if let Some(contribution) = (rule.eval)(record) {
                total += contribution.weight;
                hits.push(RuleHit {
                    rule: rule.name,
                    weight: contribution.weight,
                    note: contribution.note,
                });
            }
        }

        ScoreCard {
            total: total.clamp(self.lower, self.upper),
            hits,
        }
    }
}

/// Discrete contribution to a score, allowing transparent audits.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleHit {
    pub rule: &'static str,
    pub weight: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Result of evaluating a rule table against one record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreCard {
    pub total: f64,
    pub hits: Vec<RuleHit>,
}

impl ScoreCard {
    pub fn notes(&self) -> Vec<String> {
        self.hits
            .iter()
            .filter_map(|hit| hit.note.clone())
            .collect()
    }
}
