//! Pattern library: ordered document-type profiles and universal risk rules.
//!
//! The library is an immutable value. Profile order is part of the contract:
//! classification ties resolve to the profile declared first.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::ScoringError;

/// Reserved id for text that matches no profile with enough evidence.
pub const UNKNOWN_TYPE_ID: &str = "unknown";

/// Display name of the reserved unknown profile.
pub const UNKNOWN_TYPE_NAME: &str = "Unclassified Document";

/// A named legal-document category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentTypeProfile {
  pub id: String,
  pub name: String,
  /// Classification substrings (case-insensitive).
  pub patterns: Vec<String>,
  /// Type-specific risk phrases (case-insensitive), weight 1 each.
  #[serde(default)]
  pub risk_factors: Vec<String>,
}

impl DocumentTypeProfile {
  fn unknown() -> Self {
    Self {
      id: UNKNOWN_TYPE_ID.to_string(),
      name: UNKNOWN_TYPE_NAME.to_string(),
      patterns: Vec::new(),
      risk_factors: Vec::new(),
    }
  }

  pub fn is_unknown(&self) -> bool {
    self.id == UNKNOWN_TYPE_ID
  }
}

/// A universal (pattern, weight, description) rule applied to every document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniversalRiskRule {
  pub pattern: String,
  pub weight: f64,
  pub description: String,
}

/// Unvalidated library shape as it appears in settings files.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LibraryDef {
  profiles: Vec<DocumentTypeProfile>,
  rules: Vec<UniversalRiskRule>,
}

impl TryFrom<LibraryDef> for PatternLibrary {
  type Error = ScoringError;

  fn try_from(def: LibraryDef) -> Result<Self, Self::Error> {
    PatternLibrary::new(def.profiles, def.rules)
  }
}

/// Immutable, ordered registry of profiles plus the universal rule list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LibraryDef")]
pub struct PatternLibrary {
  profiles: Vec<DocumentTypeProfile>,
  rules: Vec<UniversalRiskRule>,
  #[serde(skip)]
  unknown: DocumentTypeProfile,
}

impl PatternLibrary {
  /// Build a library, lowercasing every pattern and validating the tables.
  pub fn new(
    profiles: Vec<DocumentTypeProfile>,
    rules: Vec<UniversalRiskRule>,
  ) -> Result<Self, ScoringError> {
    let mut seen = HashSet::new();
    let mut normalized = Vec::with_capacity(profiles.len());

    for (i, mut profile) in profiles.into_iter().enumerate() {
      let field = format!("library.profiles[{}]", i);
      let id = profile.id.trim().to_string();
      if id.is_empty() {
        return Err(ScoringError::invalid_input(&field, "id must not be empty"));
      }
      if id == UNKNOWN_TYPE_ID {
        return Err(ScoringError::invalid_input(&field, "id \"unknown\" is reserved"));
      }
      if !seen.insert(id.clone()) {
        return Err(ScoringError::invalid_input(&field, &format!("duplicate id {:?}", id)));
      }
      if profile.patterns.is_empty() {
        return Err(ScoringError::invalid_input(&field, "needs at least one pattern"));
      }
      profile.id = id;
      profile.patterns = lowercase_all(&profile.patterns, &format!("{}.patterns", field))?;
      profile.risk_factors =
        lowercase_all(&profile.risk_factors, &format!("{}.risk_factors", field))?;
      normalized.push(profile);
    }

    let rules = rules
      .into_iter()
      .enumerate()
      .map(|(i, rule)| {
        let field = format!("library.rules[{}]", i);
        let pattern = rule.pattern.trim().to_lowercase();
        if pattern.is_empty() {
          return Err(ScoringError::invalid_input(&field, "pattern must not be empty"));
        }
        if !rule.weight.is_finite() || rule.weight <= 0.0 {
          return Err(ScoringError::invalid_input(&field, "weight must be positive"));
        }
        Ok(UniversalRiskRule {
          pattern,
          weight: rule.weight,
          description: rule.description,
        })
      })
      .collect::<Result<Vec<_>, ScoringError>>()?;

    Ok(Self {
      profiles: normalized,
      rules,
      unknown: DocumentTypeProfile::unknown(),
    })
  }

  /// The built-in rule table used by the platform.
  pub fn builtin() -> Self {
    let profiles = BUILTIN_PROFILES
      .iter()
      .map(|(id, name, patterns, factors)| DocumentTypeProfile {
        id: id.to_string(),
        name: name.to_string(),
        patterns: patterns.iter().map(|p| p.to_string()).collect(),
        risk_factors: factors.iter().map(|f| f.to_string()).collect(),
      })
      .collect();
    let rules = BUILTIN_RULES
      .iter()
      .map(|(pattern, weight, description)| UniversalRiskRule {
        pattern: pattern.to_string(),
        weight: *weight,
        description: description.to_string(),
      })
      .collect();

    Self {
      profiles,
      rules,
      unknown: DocumentTypeProfile::unknown(),
    }
  }

  /// Classifiable profiles in declaration order (excludes `unknown`).
  pub fn profiles(&self) -> &[DocumentTypeProfile] {
    &self.profiles
  }

  pub fn rules(&self) -> &[UniversalRiskRule] {
    &self.rules
  }

  /// Profile for `type_id`, falling back to the empty `unknown` profile.
  pub fn profile(&self, type_id: &str) -> &DocumentTypeProfile {
    self
      .profiles
      .iter()
      .find(|p| p.id == type_id)
      .unwrap_or(&self.unknown)
  }

  pub fn unknown_profile(&self) -> &DocumentTypeProfile {
    &self.unknown
  }
}

impl Default for PatternLibrary {
  fn default() -> Self {
    Self::builtin()
  }
}

fn lowercase_all(items: &[String], field: &str) -> Result<Vec<String>, ScoringError> {
  items
    .iter()
    .map(|s| {
      let p = s.trim().to_lowercase();
      if p.is_empty() {
        Err(ScoringError::invalid_input(field, "entries must not be empty"))
      } else {
        Ok(p)
      }
    })
    .collect()
}

type ProfileRow = (&'static str, &'static str, &'static [&'static str], &'static [&'static str]);

// Declaration order is the classification tie-break order.
const BUILTIN_PROFILES: &[ProfileRow] = &[
  (
    "terms_of_service",
    "Terms of Service",
    &[
      "terms of service",
      "terms of use",
      "terms and conditions",
      "user agreement",
      "acceptable use",
      "your account",
    ],
    &[
      "suspend your account",
      "license to your content",
      "modify the service",
      "no warranty",
      "governing law",
    ],
  ),
  (
    "privacy_policy",
    "Privacy Policy",
    &[
      "privacy policy",
      "personal information",
      "personal data",
      "information we collect",
      "cookies",
      "data retention",
      "opt out",
    ],
    &[
      "sell",
      "third part",
      "tracking",
      "location data",
      "retain",
      "advertising partners",
      "data broker",
    ],
  ),
  (
    "lease_agreement",
    "Lease Agreement",
    &[
      "lease agreement",
      "landlord",
      "tenant",
      "premises",
      "security deposit",
      "monthly rent",
      "lessee",
    ],
    &[
      "eviction",
      "forfeit",
      "enter the premises",
      "rent increase",
      "tenant shall repair",
    ],
  ),
  (
    "employment_contract",
    "Employment Contract",
    &[
      "employment",
      "employee",
      "employer",
      "salary",
      "job duties",
      "probationary period",
    ],
    &[
      "non-solicit",
      "at-will",
      "assign all inventions",
      "unpaid overtime",
      "clawback",
    ],
  ),
  (
    "loan_agreement",
    "Loan Agreement",
    &[
      "loan",
      "borrower",
      "lender",
      "interest rate",
      "principal",
      "repayment",
    ],
    &[
      "variable rate",
      "prepayment penalty",
      "event of default",
      "collateral",
      "balloon payment",
      "acceleration",
    ],
  ),
  (
    "nda",
    "Non-Disclosure Agreement",
    &[
      "non-disclosure",
      "confidential information",
      "disclosing party",
      "receiving party",
      "confidentiality",
    ],
    &[
      "injunctive relief",
      "residuals",
      "return or destroy",
      "survive termination",
    ],
  ),
];

const BUILTIN_RULES: &[(&str, f64, &str)] = &[
  ("binding arbitration", 3.0, "Disputes go to private arbitration instead of court"),
  ("class action", 2.0, "You may be giving up the right to join a class action"),
  ("waive", 2.0, "You are asked to waive legal rights"),
  ("sell your", 4.5, "Your personal data may be sold"),
  ("share with third part", 4.0, "Your data may be shared with third parties"),
  ("jury trial", 2.0, "You may be giving up the right to a jury trial"),
  ("indemnify", 2.0, "You may have to cover the other party's legal costs"),
  ("hold harmless", 2.0, "You may be barred from holding the other party responsible"),
  ("non-compete", 2.0, "Restricts where you can work after the agreement ends"),
  ("liquidated damages", 2.0, "Fixed penalties apply if you break the agreement"),
  ("automatic renewal", 2.0, "The agreement renews automatically unless cancelled"),
  ("non-refundable", 2.0, "Payments cannot be refunded"),
  ("terminate at any time", 1.5, "The other party can end the agreement at any time"),
  ("without notice", 1.5, "Changes or termination can happen without notice"),
  ("sole discretion", 1.5, "Decisions are left entirely to the other party"),
  ("limitation of liability", 1.5, "The other party limits what it owes you if things go wrong"),
  ("irrevocable", 1.5, "Rights you grant cannot be taken back"),
  ("late fee", 1.0, "Late payments carry extra fees"),
  ("\"as is\"", 1.0, "No promise is made about quality or fitness"),
  ("we may modify", 1.0, "Terms can be changed by the other party"),
];
