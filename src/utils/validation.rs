use validator::ValidationError;

pub const EMPLOYMENT_TYPES: &[&str] = &["Full-time", "Part-time", "Contract", "Internship"];
pub const PROVIDER_TYPES: &[&str] = &["University", "Government", "Private", "NGO", "Other"];
pub const EDUCATION_LEVELS: &[&str] = &["High School", "Bachelor", "Master", "Doctorate", "Any"];

fn one_of(value: &str, allowed: &[&str], code: &'static str, message: &str) -> Result<(), ValidationError> {
    if allowed.contains(&value) {
        return Ok(());
    }
    let mut err = ValidationError::new(code);
    err.message = Some(message.to_string().into());
    Err(err)
}

fn fail(code: &'static str, message: &str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.to_string().into());
    err
}

fn required_with_max(
    value: &str,
    max: usize,
    code: &'static str,
    required_msg: &str,
    max_msg: &str,
) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(fail(code, required_msg));
    }
    if value.chars().count() > max {
        return Err(fail(code, max_msg));
    }
    Ok(())
}

fn required_with_min(
    value: &str,
    min: usize,
    code: &'static str,
    required_msg: &str,
    min_msg: &str,
) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(fail(code, required_msg));
    }
    if value.chars().count() < min {
        return Err(fail(code, min_msg));
    }
    Ok(())
}

pub fn validate_employment_type(value: &str) -> Result<(), ValidationError> {
    one_of(
        value,
        EMPLOYMENT_TYPES,
        "employment_type",
        "Employment type must be one of: Full-time, Part-time, Contract, Internship",
    )
}

pub fn validate_provider_type(value: &str) -> Result<(), ValidationError> {
    one_of(
        value,
        PROVIDER_TYPES,
        "provider_type",
        "Provider type must be one of: University, Government, Private, NGO, Other",
    )
}

pub fn validate_education_level(value: &str) -> Result<(), ValidationError> {
    one_of(
        value,
        EDUCATION_LEVELS,
        "education_level",
        "Education level must be one of: High School, Bachelor, Master, Doctorate, Any",
    )
}

pub fn validate_vacancy_title(value: &str) -> Result<(), ValidationError> {
    required_with_max(
        value,
        100,
        "title",
        "Job title is required",
        "Title cannot be more than 100 characters",
    )
}

pub fn validate_scholarship_title(value: &str) -> Result<(), ValidationError> {
    required_with_max(
        value,
        100,
        "title",
        "Scholarship title is required",
        "Title cannot be more than 100 characters",
    )
}

pub fn validate_forum_title(value: &str) -> Result<(), ValidationError> {
    required_with_max(
        value,
        200,
        "title",
        "Title is required",
        "Title cannot be more than 200 characters",
    )
}

pub fn validate_vacancy_description(value: &str) -> Result<(), ValidationError> {
    required_with_min(
        value,
        50,
        "description",
        "Job description is required",
        "Description must be at least 50 characters long",
    )
}

pub fn validate_scholarship_description(value: &str) -> Result<(), ValidationError> {
    required_with_min(
        value,
        100,
        "description",
        "Description is required",
        "Description must be at least 100 characters long",
    )
}

pub fn validate_forum_description(value: &str) -> Result<(), ValidationError> {
    required_with_min(
        value,
        50,
        "description",
        "Description is required",
        "Description must be at least 50 characters long",
    )
}

pub fn validate_password_digit(value: &str) -> Result<(), ValidationError> {
    if value.chars().any(|c| c.is_ascii_digit()) {
        return Ok(());
    }
    let mut err = ValidationError::new("password_digit");
    err.message = Some("Password must contain at least one number".into());
    Err(err)
}
