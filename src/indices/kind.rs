//! Index names, display titles and renderer hints

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use crate::error::EthnoError;

/// Every quantity the engine can compute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum IndexKind {
    UseReport,
    CulturalImportance,
    FrequencyOfCitation,
    NumberOfUses,
    RelativeFrequencyOfCitation,
    RelativeImportance,
    UseValue,
    CulturalValue,
    FidelityLevel,
    InformantConsensus,
    Jaccard,
}

/// External renderer a result table is meant for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Renderer {
    RadialBar,
    Heatmap,
    Table,
}

impl IndexKind {
    /// Per-taxon indices, in all-taxon summary column order
    pub const PER_TAXON: [IndexKind; 8] = [
        IndexKind::CulturalImportance,
        IndexKind::FrequencyOfCitation,
        IndexKind::NumberOfUses,
        IndexKind::UseReport,
        IndexKind::RelativeFrequencyOfCitation,
        IndexKind::RelativeImportance,
        IndexKind::UseValue,
        IndexKind::CulturalValue,
    ];

    /// Short name, also the value column name in result frames
    pub fn short_name(self) -> &'static str {
        match self {
            IndexKind::UseReport => "UR",
            IndexKind::CulturalImportance => "CI",
            IndexKind::FrequencyOfCitation => "FC",
            IndexKind::NumberOfUses => "NU",
            IndexKind::RelativeFrequencyOfCitation => "RFC",
            IndexKind::RelativeImportance => "RI",
            IndexKind::UseValue => "UV",
            IndexKind::CulturalValue => "CV",
            IndexKind::FidelityLevel => "FL",
            IndexKind::InformantConsensus => "FIC",
            IndexKind::Jaccard => "similarity",
        }
    }

    /// Plot title handed to renderers
    pub fn title(self) -> &'static str {
        match self {
            IndexKind::UseReport => "Use Report (UR) per Species",
            IndexKind::CulturalImportance => "Cultural Importance (CI) Index",
            IndexKind::FrequencyOfCitation => "Frequency of Citation (FC)",
            IndexKind::NumberOfUses => "Number of Uses (NU) per Species",
            IndexKind::RelativeFrequencyOfCitation => "Relative Frequency of Citation (RFC) per Species",
            IndexKind::RelativeImportance => "Relative Importance (RI) Index per Species",
            IndexKind::UseValue => "Use Value (UV) per Species",
            IndexKind::CulturalValue => "Cultural Value (CV) for Ethnospecies",
            IndexKind::FidelityLevel => "Fidelity Level (FL)",
            IndexKind::InformantConsensus => "Informant Consensus Factor (FIC)",
            IndexKind::Jaccard => "Jaccard Similarity",
        }
    }

    /// Default export file name
    pub fn csv_file_name(self) -> &'static str {
        match self {
            IndexKind::UseReport => "use_report_UR.csv",
            IndexKind::CulturalImportance => "cultural_importance_CI.csv",
            IndexKind::FrequencyOfCitation => "frequency_of_citation_FC.csv",
            IndexKind::NumberOfUses => "number_of_uses_NU.csv",
            IndexKind::RelativeFrequencyOfCitation => "relative_frequency_of_citation_RFC.csv",
            IndexKind::RelativeImportance => "relative_importance_RI.csv",
            IndexKind::UseValue => "use_value_UV.csv",
            IndexKind::CulturalValue => "cultural_value_CV.csv",
            IndexKind::FidelityLevel => "fidelity_level_FL.csv",
            IndexKind::InformantConsensus => "informant_consensus_factor_FIC.csv",
            IndexKind::Jaccard => "jaccard_similarity.csv",
        }
    }

    pub fn is_per_taxon(self) -> bool {
        Self::PER_TAXON.contains(&self)
    }

    pub fn renderer(self) -> Renderer {
        match self {
            IndexKind::FidelityLevel => Renderer::Heatmap,
            IndexKind::Jaccard => Renderer::Table,
            _ => Renderer::RadialBar,
        }
    }
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

impl FromStr for IndexKind {
    type Err = EthnoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "UR" => Ok(IndexKind::UseReport),
            "CI" => Ok(IndexKind::CulturalImportance),
            "FC" => Ok(IndexKind::FrequencyOfCitation),
            "NU" => Ok(IndexKind::NumberOfUses),
            "RFC" => Ok(IndexKind::RelativeFrequencyOfCitation),
            "RI" => Ok(IndexKind::RelativeImportance),
            "UV" => Ok(IndexKind::UseValue),
            "CV" => Ok(IndexKind::CulturalValue),
            "FL" => Ok(IndexKind::FidelityLevel),
            "FIC" => Ok(IndexKind::InformantConsensus),
            "JACCARD" => Ok(IndexKind::Jaccard),
            other => Err(EthnoError::Schema(format!("unknown index '{}'", other))),
        }
    }
}
