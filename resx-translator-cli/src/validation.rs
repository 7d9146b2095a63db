use std::path::Path;

use resx_translator::RenderStrategy;
use unic_langid::LanguageIdentifier;

/// Validation context for the `translate` command
#[derive(Debug, Default)]
pub struct ValidationContext {
    pub input_file: Option<String>,
    pub output_file: Option<String>,
    pub source_language: Option<String>,
    pub target_language: Option<String>,
    pub strategy: Option<String>,
    pub endpoint: Option<String>,
}

impl ValidationContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input_file(mut self, file: String) -> Self {
        self.input_file = Some(file);
        self
    }

    pub fn with_output_file(mut self, file: String) -> Self {
        self.output_file = Some(file);
        self
    }

    pub fn with_languages(mut self, source: String, target: String) -> Self {
        self.source_language = Some(source);
        self.target_language = Some(target);
        self
    }

    pub fn with_strategy(mut self, strategy: String) -> Self {
        self.strategy = Some(strategy);
        self
    }

    pub fn with_endpoint(mut self, endpoint: String) -> Self {
        self.endpoint = Some(endpoint);
        self
    }
}

/// Validate file path exists and is readable
pub fn validate_file_path(path: &str) -> Result<(), String> {
    let path_obj = Path::new(path);

    if !path_obj.exists() {
        return Err(format!("File does not exist: {}", path));
    }

    if !path_obj.is_file() {
        return Err(format!("Path is not a file: {}", path));
    }

    Ok(())
}

/// Validate the output file's directory exists; nothing is created here
pub fn validate_output_path(path: &str) -> Result<(), String> {
    let path_obj = Path::new(path);

    if path_obj.is_dir() {
        return Err(format!("Output path is a directory: {}", path));
    }

    if let Some(parent) = path_obj.parent() {
        if !parent.as_os_str().is_empty() && !parent.is_dir() {
            return Err(format!(
                "Output directory does not exist: {}",
                parent.display()
            ));
        }
    }

    Ok(())
}

/// Whether `input` and `output` name the same existing file, however they are spelled
pub fn is_same_file(input: &str, output: &str) -> bool {
    match (Path::new(input).canonicalize(), Path::new(output).canonicalize()) {
        (Ok(input), Ok(output)) => input == output,
        _ => false,
    }
}

/// Validate language code format using unic-langid (same as lib crate)
pub fn validate_language_code(lang: &str) -> Result<(), String> {
    if lang.trim().is_empty() {
        return Err("Language code cannot be empty".to_string());
    }

    lang.trim()
        .parse::<LanguageIdentifier>()
        .map(|_| ())
        .map_err(|_| {
            format!(
                "Invalid language code format: {}. Expected valid BCP 47 language identifier",
                lang
            )
        })
}

/// Source and target must be valid and must differ
pub fn validate_language_pair(source: &str, target: &str) -> Result<(), String> {
    validate_language_code(source).map_err(|e| format!("Source language: {}", e))?;
    validate_language_code(target).map_err(|e| format!("Target language: {}", e))?;

    if source.trim().eq_ignore_ascii_case(target.trim()) {
        return Err(format!(
            "Source and target language are the same: {}",
            source.trim()
        ));
    }
    Ok(())
}

pub fn validate_strategy(strategy: &str) -> Result<(), String> {
    strategy
        .parse::<RenderStrategy>()
        .map(|_| ())
        .map_err(|_| {
            format!(
                "Unsupported output strategy: {}. Supported strategies: tree, template",
                strategy
            )
        })
}

/// Endpoint must be an absolute https URL
pub fn validate_endpoint(endpoint: &str) -> Result<(), String> {
    if endpoint.trim().is_empty() {
        return Err("Endpoint cannot be empty".to_string());
    }
    resx_translator::ServiceConfig::default()
        .with_endpoint(endpoint)
        .endpoint_url()
        .map(|_| ())
        .map_err(|e| e.to_string())
}

/// Validate a complete validation context
pub fn validate_context(context: &ValidationContext) -> Result<(), String> {
    if let Some(ref input) = context.input_file {
        validate_file_path(input).map_err(|e| format!("Input file validation failed: {}", e))?;
    }

    if let Some(ref output) = context.output_file {
        validate_output_path(output).map_err(|e| format!("Output validation failed: {}", e))?;
        if context
            .input_file
            .as_deref()
            .is_some_and(|input| is_same_file(input, output))
        {
            return Err("Output validation failed: output would overwrite the input file".into());
        }
    }

    if let (Some(source), Some(target)) = (&context.source_language, &context.target_language) {
        validate_language_pair(source, target)
            .map_err(|e| format!("Language code validation failed: {}", e))?;
    }

    if let Some(ref strategy) = context.strategy {
        validate_strategy(strategy)?;
    }

    if let Some(ref endpoint) = context.endpoint {
        validate_endpoint(endpoint).map_err(|e| format!("Endpoint validation failed: {}", e))?;
    }

    Ok(())
}
