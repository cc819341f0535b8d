use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelCategory {
    Search,
    General,
    Unknown,
}

impl fmt::Display for ModelCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelCategory::Search => write!(f, "search"),
            ModelCategory::General => write!(f, "general"),
            ModelCategory::Unknown => write!(f, "unknown"),
        }
    }
}

/// Models served by the search-chat gateway.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchModel {
    DeepSeekV3,
    DeepSeekR1,
    DeepSeekV3Search,
    #[default]
    DeepSeekR1Search,
    Hunyuan,
    HunyuanT1,
    Override(String),
}

impl SearchModel {
    /// Resolve a model id; ids outside the catalog become `Override`.
    pub fn from_id(id: &str) -> Self {
        match id {
            "deepseek-v3" => Self::DeepSeekV3,
            "deepseek-r1" => Self::DeepSeekR1,
            "deepseek-v3-search" => Self::DeepSeekV3Search,
            "deepseek-r1-search" => Self::DeepSeekR1Search,
            "hunyuan" => Self::Hunyuan,
            "hunyuan-t1" => Self::HunyuanT1,
            other => Self::Override(other.to_string()),
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::DeepSeekV3 => "deepseek-v3",
            Self::DeepSeekR1 => "deepseek-r1",
            Self::DeepSeekV3Search => "deepseek-v3-search",
            Self::DeepSeekR1Search => "deepseek-r1-search",
            Self::Hunyuan => "hunyuan",
            Self::HunyuanT1 => "hunyuan-t1",
            Self::Override(s) => s.as_str(),
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Self::DeepSeekV3 => "DeepSeek V3",
            Self::DeepSeekR1 => "DeepSeek R1",
            Self::DeepSeekV3Search => "DeepSeek V3 Search",
            Self::DeepSeekR1Search => "DeepSeek R1 Search",
            Self::Hunyuan => "Hunyuan",
            Self::HunyuanT1 => "Hunyuan T1",
            Self::Override(s) => s.as_str(),
        }
    }

    pub fn category(&self) -> ModelCategory {
        match self {
            Self::DeepSeekV3 | Self::DeepSeekR1 | Self::DeepSeekV3Search | Self::DeepSeekR1Search => {
                ModelCategory::Search
            }
            Self::Hunyuan | Self::HunyuanT1 => ModelCategory::General,
            Self::Override(_) => ModelCategory::Unknown,
        }
    }
}

impl fmt::Display for SearchModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
