use super::*;

// -- Search sanitisation --

#[test]
fn search_trims_and_strips_controls() {
    assert_eq!(
        validate_search("  suco\u{0007} de uva ").unwrap(),
        Some("suco de uva".to_string())
    );
}

#[test]
fn search_blank_is_none() {
    assert_eq!(validate_search("").unwrap(), None);
    assert_eq!(validate_search("   ").unwrap(), None);
}

#[test]
fn search_too_long() {
    let long = "a".repeat(MAX_SEARCH_LENGTH + 1);
    assert!(validate_search(&long).is_err());
}

#[test]
fn sanitize_rejects_control_only_input() {
    assert!(sanitize_text("\u{0001}\u{0002}", 10).is_err());
}

// -- Price parsing --

#[test]
fn price_masked_brl() {
    assert_eq!(parse_price("R$ 1.234,56"), Some(1234.56));
    assert_eq!(parse_price("R$ 0,00"), Some(0.0));
    assert_eq!(parse_price("12,5"), Some(12.5));
}

#[test]
fn price_plain_decimal() {
    assert_eq!(parse_price("19.90"), Some(19.90));
    assert_eq!(parse_price("7"), Some(7.0));
}

#[test]
fn price_single_dot_is_decimal_without_mask() {
    assert_eq!(parse_price("1.234"), Some(1.234));
    assert_eq!(parse_price("12.500"), Some(12.5));
    assert_eq!(parse_price("1.234.567"), Some(1234567.0));
}

#[test]
fn price_dots_group_thousands_under_mask() {
    assert_eq!(parse_price("R$ 1.234"), Some(1234.0));
    assert_eq!(parse_price("R$ 12.500"), Some(12500.0));
    assert_eq!(parse_price("1.234,5"), Some(1234.5));
    assert_eq!(parse_price("R$ 12.5"), None);
}

#[test]
fn price_blank_is_zero() {
    assert_eq!(parse_price(""), Some(0.0));
    assert_eq!(parse_price("R$ "), Some(0.0));
}

#[test]
fn price_garbage() {
    assert_eq!(parse_price("doze reais"), None);
    assert_eq!(parse_price("1,2,3"), None);
}

#[test]
fn price_formatting() {
    assert_eq!(format_price(1234.5), "R$ 1.234,50");
    assert_eq!(format_price(12.9), "R$ 12,90");
    assert_eq!(format_price(0.0), "R$ 0,00");
    assert_eq!(parse_price(&format_price(98765.43)), Some(98765.43));
}

// -- Category schema --

#[test]
fn category_empty_name_is_required() {
    let draft = CategoryDraft {
        name: String::new(),
        description: "Bebidas em geral".to_string(),
    };
    let errors = draft.validate(SchemaMode::Create).unwrap_err();
    assert_eq!(errors.get("name"), Some("Nome obrigatório."));
    assert_eq!(errors.get("description"), None);
}

#[test]
fn category_short_fields() {
    let draft = CategoryDraft {
        name: "ab".to_string(),
        description: "abcd".to_string(),
    };
    let errors = draft.validate(SchemaMode::Create).unwrap_err();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors.get("description"), Some("Descrição obrigatória."));
}

#[test]
fn category_valid_payload() {
    let draft = CategoryDraft {
        name: "Bebidas".to_string(),
        description: "Sucos e refrigerantes".to_string(),
    };
    let payload = draft.validate(SchemaMode::Create).unwrap();
    assert_eq!(payload.name, "Bebidas");
}

#[test]
fn category_edit_has_upper_bounds() {
    let draft = CategoryDraft {
        name: "n".repeat(256),
        description: "d".repeat(511),
    };
    assert!(draft.validate(SchemaMode::Create).is_ok());

    let errors = draft.validate(SchemaMode::Edit).unwrap_err();
    assert_eq!(errors.get("name"), Some("Nome muito longo."));
    assert_eq!(errors.get("description"), Some("Descrição muito longa."));
}

#[test]
fn category_length_counts_characters() {
    let draft = CategoryDraft {
        name: "pão".to_string(),
        description: "ações".to_string(),
    };
    assert!(draft.validate(SchemaMode::Edit).is_ok());
}

// -- Product schema --

fn valid_product() -> ProductDraft {
    ProductDraft {
        name: "Suco de uva".to_string(),
        description: "Suco integral 1L".to_string(),
        price: "R$ 12,90".to_string(),
        stock_quantity: "40".to_string(),
        ..ProductDraft::default()
    }
}

#[test]
fn product_valid_payload() {
    let payload = valid_product().validate().unwrap();
    assert_eq!(payload.price, 12.90);
    assert_eq!(payload.stock_quantity, 40);
    assert_eq!(payload.category_id, None);
    assert_eq!(payload.is_featured, Some(false));
}

#[test]
fn product_price_must_be_positive() {
    let draft = ProductDraft {
        price: "R$ 0,00".to_string(),
        ..valid_product()
    };
    let errors = draft.validate().unwrap_err();
    assert_eq!(errors.get("price"), Some("Preço deve ser maior que zero."));
}

#[test]
fn product_price_unparseable() {
    let draft = ProductDraft {
        price: "abc".to_string(),
        ..valid_product()
    };
    let errors = draft.validate().unwrap_err();
    assert_eq!(errors.get("price"), Some("Preço inválido."));
}

#[test]
fn product_stock_rules() {
    let fractional = ProductDraft {
        stock_quantity: "2.5".to_string(),
        ..valid_product()
    };
    assert_eq!(
        fractional.validate().unwrap_err().get("stock_quantity"),
        Some("Quantidade deve ser um número inteiro.")
    );

    let zero = ProductDraft {
        stock_quantity: "0".to_string(),
        ..valid_product()
    };
    assert_eq!(
        zero.validate().unwrap_err().get("stock_quantity"),
        Some("Quantidade deve ser maior que zero.")
    );
}

#[test]
fn product_optional_strings_must_not_be_empty() {
    let draft = ProductDraft {
        category_id: Some(String::new()),
        sku: Some(String::new()),
        ..valid_product()
    };
    let errors = draft.validate().unwrap_err();
    assert_eq!(errors.get("category_id"), Some("Categoria obrigatória."));
    assert_eq!(errors.get("sku"), Some("SKU obrigatório."));
}

#[test]
fn product_weight_and_dimensions() {
    let draft = ProductDraft {
        weight: Some("1,25".to_string()),
        dimensions: Some("  ".to_string()),
        is_featured: true,
        ..valid_product()
    };
    let payload = draft.validate().unwrap();
    assert_eq!(payload.weight, Some(1.25));
    assert_eq!(payload.dimensions, None);
    assert_eq!(payload.is_featured, Some(true));

    let bad = ProductDraft {
        weight: Some("pesado".to_string()),
        ..valid_product()
    };
    assert_eq!(bad.validate().unwrap_err().get("weight"), Some("Peso inválido."));
}

#[test]
fn field_errors_display() {
    let mut errors = FieldErrors::new();
    errors.insert("name", "Nome obrigatório.");
    errors.insert("name", "ignored");
    errors.insert("description", "Descrição obrigatória.");
    assert_eq!(
        errors.to_string(),
        "description: Descrição obrigatória.; name: Nome obrigatório."
    );
}
