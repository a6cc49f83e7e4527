use super::*;

#[test]
fn header_value_should_be_none_when_nothing_exposed() {
    // Arrange & Act
    let exposed = ExposedHeaders::none();

    // Assert
    assert!(exposed.is_empty());
    assert_eq!(exposed.header_value(), None);
}

#[test]
fn header_value_should_join_names_when_list_configured() {
    // Arrange
    let exposed = ExposedHeaders::list(["X-Total-Count", " ", "x-total-count", "ETag"]);

    // Act
    let value = exposed.header_value();

    // Assert
    assert_eq!(value.as_deref(), Some("X-Total-Count, ETag"));
}

#[test]
fn validate_should_reject_when_name_contains_colon() {
    // Arrange
    let exposed = ExposedHeaders::list(["X-Bad:Name"]);

    // Act
    let result = exposed.validate();

    // Assert
    assert!(matches!(result, Err(ValidationError::InvalidHeaderName(_))));
}
