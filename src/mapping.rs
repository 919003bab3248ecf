//! Type-mapping seam.
//!
//! Converting an IR type reference to C# type text is an external service as
//! far as the generator is concerned; [`TypeMapper`] is its interface.
//! [`ClrTypeMapper`] is the table-driven default used by tests and simple
//! hosts.

use crate::ir::{IrType, PrimitiveType};

/// Convert IR types into C# type names.
pub trait TypeMapper {
    /// Map a type in value position.
    fn map_type(&self, ty: &IrType) -> String;

    /// Map a type in return position (`kotlin.Unit` becomes `void`).
    fn map_return_type(&self, ty: &IrType) -> String;
}

/// Default mapper for the builtin Kotlin types and the `kotlin.*` runtime.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClrTypeMapper;

impl ClrTypeMapper {
    pub fn new() -> Self {
        Self
    }

    fn map_primitive(primitive: PrimitiveType) -> &'static str {
        match primitive {
            PrimitiveType::Boolean => "bool",
            PrimitiveType::Char => "char",
            PrimitiveType::Byte => "sbyte",
            PrimitiveType::Short => "short",
            PrimitiveType::Int => "int",
            PrimitiveType::Long => "long",
            PrimitiveType::Float => "float",
            PrimitiveType::Double => "double",
        }
    }
}

impl TypeMapper for ClrTypeMapper {
    fn map_type(&self, ty: &IrType) -> String {
        match ty {
            IrType::Primitive(p) => Self::map_primitive(*p).to_string(),
            IrType::Unit => "void".to_string(),
            // `Nothing` only appears in return position in practice; `void`
            // plus the does-not-return attribute covers it.
            IrType::Nothing => "void".to_string(),
            IrType::Class {
                package,
                name,
                arguments,
            } => {
                if package == &["kotlin"] {
                    match name.as_str() {
                        "String" => return "string".to_string(),
                        "Any" => return "object".to_string(),
                        "Array" => {
                            if let Some(element) = arguments.first() {
                                return format!("{}[]", self.map_type(element));
                            }
                        }
                        _ => {}
                    }
                }
                let mut text = String::from("global::");
                for segment in package {
                    text.push_str(segment);
                    text.push('.');
                }
                text.push_str(name);
                if !arguments.is_empty() {
                    let args: Vec<String> = arguments.iter().map(|a| self.map_type(a)).collect();
                    text.push('<');
                    text.push_str(&args.join(", "));
                    text.push('>');
                }
                text
            }
        }
    }

    fn map_return_type(&self, ty: &IrType) -> String {
        match ty {
            IrType::Unit => "void".to_string(),
            other => self.map_type(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::IrType;

    #[test]
    fn test_primitive_mapping() {
        let mapper = ClrTypeMapper::new();
        assert_eq!(mapper.map_type(&IrType::Primitive(PrimitiveType::Int)), "int");
        assert_eq!(mapper.map_type(&IrType::Primitive(PrimitiveType::Boolean)), "bool");
    }

    #[test]
    fn test_builtin_class_mapping() {
        let mapper = ClrTypeMapper::new();
        assert_eq!(mapper.map_type(&IrType::string()), "string");
        assert_eq!(mapper.map_type(&IrType::class(&["kotlin"], "Any")), "object");
        let args = IrType::generic(&["kotlin"], "Array", vec![IrType::string()]);
        assert_eq!(mapper.map_type(&args), "string[]");
    }

    #[test]
    fn test_user_class_mapping_is_fully_qualified() {
        let mapper = ClrTypeMapper::new();
        let ty = IrType::class(&["com", "example"], "User");
        assert_eq!(mapper.map_type(&ty), "global::com.example.User");
        let generic = IrType::generic(&["kotlin", "collections"], "List", vec![IrType::string()]);
        assert_eq!(mapper.map_type(&generic), "global::kotlin.collections.List<string>");
    }

    #[test]
    fn test_return_type_mapping() {
        let mapper = ClrTypeMapper::new();
        assert_eq!(mapper.map_return_type(&IrType::Unit), "void");
        assert_eq!(mapper.map_return_type(&IrType::string()), "string");
    }
}
