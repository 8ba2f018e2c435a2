use std::fmt;

/// A named bundle of model-selection arguments for the backend server
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ModelPreset {
    /// Model repository name (`-m`)
    pub name: String,
    /// Model version (`-g`), omitted when empty
    pub version: String,
    /// Model revision (`-r`), omitted when empty
    pub revision: String,
    /// Local path of the model
    pub path: String,
    /// Download location of the model
    pub download: String,
}

impl ModelPreset {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_revision(mut self, revision: impl Into<String>) -> Self {
        self.revision = revision.into();
        self
    }

    /// Server arguments selecting this model
    pub fn args(&self) -> Vec<String> {
        let mut args = vec!["-m".to_string(), self.name.clone()];
        if !self.version.is_empty() {
            args.push("-g".to_string());
            args.push(self.version.clone());
        }
        if !self.revision.is_empty() {
            args.push("-r".to_string());
            args.push(self.revision.clone());
        }
        args
    }
}

impl fmt::Display for ModelPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.args().join(" "))
    }
}

/// Builds presets that share default field values
#[derive(Debug, Clone, Default)]
pub struct PresetFactory {
    template: ModelPreset,
}

impl PresetFactory {
    /// Factory whose presets default to `template`'s fields (its name is ignored)
    pub fn new(template: ModelPreset) -> Self {
        Self { template }
    }

    /// Factory whose presets share a version
    pub fn with_version(version: impl Into<String>) -> Self {
        Self::new(ModelPreset::default().with_version(version))
    }

    /// A preset for `name` carrying the factory defaults
    pub fn preset(&self, name: impl Into<String>) -> ModelPreset {
        ModelPreset {
            name: name.into(),
            ..self.template.clone()
        }
    }
}

/// Ordered label -> preset table
#[derive(Debug, Clone, Default)]
pub struct PresetTable {
    entries: Vec<(String, ModelPreset)>,
}

impl PresetTable {
    pub fn push(&mut self, label: impl Into<String>, preset: ModelPreset) {
        self.entries.push((label.into(), preset));
    }

    /// Look a preset up by label, ignoring case
    pub fn get(&self, label: &str) -> Option<&ModelPreset> {
        self.entries.iter()
            .find(|(l, _)| l.eq_ignore_ascii_case(label.trim()))
            .map(|(_, preset)| preset)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(label, _)| label.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ModelPreset)> {
        self.entries.iter().map(|(label, preset)| (label.as_str(), preset))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The known model presets, each carrying `version`
pub fn model_presets(version: &str) -> PresetTable {
    let mf = PresetFactory::with_version(version);
    let mut table = PresetTable::default();

    table.push("Nerys V2 6B", mf.preset("KoboldAI/OPT-6B-nerys-v2"));
    table.push("Erebus 6B", mf.preset("KoboldAI/OPT-6.7B-Erebus"));
    table.push("Skein 6B", mf.preset("KoboldAI/GPT-J-6B-Skein"));
    table.push("Janeway 6B", mf.preset("KoboldAI/GPT-J-6B-Janeway"));
    table.push("Adventure 6B", mf.preset("KoboldAI/GPT-J-6B-Adventure"));
    table.push("Pygmalion 6B", mf.preset("PygmalionAI/pygmalion-6b"));
    table.push("Pygmalion 6B Dev", mf.preset("PygmalionAI/pygmalion-6b").with_revision("dev"));
    table.push("Lit V2 6B", mf.preset("hakurei/litv2-6B-rev3"));
    table.push("Lit 6B", mf.preset("hakurei/lit-6B"));
    table.push("Shinen 6B", mf.preset("KoboldAI/GPT-J-6B-Shinen"));
    table.push("Nerys 2.7B", mf.preset("KoboldAI/fairseq-dense-2.7B-Nerys"));
    table.push("Erebus 2.7B", mf.preset("KoboldAI/OPT-2.7B-Erebus"));
    table.push("Janeway 2.7B", mf.preset("KoboldAI/GPT-Neo-2.7B-Janeway"));
    table.push("Picard 2.7B", mf.preset("KoboldAI/GPT-Neo-2.7B-Picard"));
    table.push("AID 2.7B", mf.preset("KoboldAI/GPT-Neo-2.7B-AID"));
    table.push("Horni LN 2.7B", mf.preset("KoboldAI/GPT-Neo-2.7B-Horni-LN"));
    table.push("Horni 2.7B", mf.preset("KoboldAI/GPT-Neo-2.7B-Horni"));
    table.push("Shinen 2.7B", mf.preset("KoboldAI/GPT-Neo-2.7B-Shinen"));
    table.push("Fairseq Dense 2.7B", mf.preset("KoboldAI/fairseq-dense-2.7B"));
    table.push("OPT 2.7B", mf.preset("facebook/opt-2.7b"));
    table.push("Neo 2.7B", mf.preset("EleutherAI/gpt-neo-2.7B"));
    table.push("Pygway 6B", mf.preset("TehVenom/PPO_Pygway-6b"));
    table.push("Nerybus 6.7B", mf.preset("KoboldAI/OPT-6.7B-Nerybus-Mix"));
    table.push("Pygway v8p4", mf.preset("TehVenom/PPO_Pygway-V8p4_Dev-6b"));
    table.push("PPO-Janeway 6B", mf.preset("TehVenom/PPO_Janeway-6b"));
    table.push("PPO Shygmalion 6B", mf.preset("TehVenom/PPO_Shygmalion-6b"));
    table.push("LLaMA 7B", mf.preset("decapoda-research/llama-7b-hf"));
    table.push("Janin-GPTJ", mf.preset("digitous/Janin-GPTJ"));
    table.push("Javelin-GPTJ", mf.preset("digitous/Javelin-GPTJ"));
    table.push("Javelin-R", mf.preset("digitous/Javelin-R"));
    table.push("Janin-R", mf.preset("digitous/Janin-R"));
    table.push("Javalion-R", mf.preset("digitous/Javalion-R"));
    table.push("Javalion-GPTJ", mf.preset("digitous/Javalion-GPTJ"));
    table.push("Javelion-6B", mf.preset("Cohee/Javelion-6b"));
    table.push("GPT-J-Pyg-PPO-6B", mf.preset("TehVenom/GPT-J-Pyg_PPO-6B"));
    table.push("ppo_hh_pythia-6B", mf.preset("reciprocate/ppo_hh_pythia-6B"));
    table.push("ppo_hh_gpt-j", mf.preset("reciprocate/ppo_hh_gpt-j"));
    table.push("Alpaca-7B", mf.preset("chainyo/alpaca-lora-7b"));
    table.push("LLaMA 4-bit", mf.preset("decapoda-research/llama-13b-hf-int4"));
    table.push("GPT-J-Pyg_PPO-6B", mf.preset("TehVenom/GPT-J-Pyg_PPO-6B"));
    table.push("GPT-J-Pyg_PPO-6B-Dev-V8p4", mf.preset("TehVenom/GPT-J-Pyg_PPO-6B-Dev-V8p4"));
    table.push("Dolly_GPT-J-6b", mf.preset("TehVenom/Dolly_GPT-J-6b"));
    table.push("Dolly_Pyg-6B", mf.preset("TehVenom/AvgMerge_Dolly-Pygmalion-6b"));

    table
}
