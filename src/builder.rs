//! Class builder
//!
//! Converts one parsed [`Schema`] into its raw, unsimplified class list.
//! The builder knows nothing about other documents: references to types,
//! groups and attribute groups are kept by name for the analyzer.

use crate::models::codegen::{Attr, Class, Tag, UNBOUNDED};
use crate::models::xsd::{
    AttributeDecl, AttributeGroup, ComplexType, ElementDecl, Facets, Group, Particle, Schema,
    SimpleType, SimpleVariety,
};
use crate::names::local_part;

const ANY_TYPE: &str = "xs:anyType";
const ANY_SIMPLE_TYPE: &str = "xs:anySimpleType";
const STRING: &str = "xs:string";

/// Builds the raw classes of a single schema document
#[derive(Debug)]
pub struct ClassBuilder<'a> {
    schema: &'a Schema,
}

impl<'a> ClassBuilder<'a> {
    /// Create a builder for `schema`
    pub fn new(schema: &'a Schema) -> Self {
        Self { schema }
    }

    /// Build every class the schema declares.
    ///
    /// Global elements, complex types and enumerations are root classes;
    /// groups, attribute groups, plain simple types and global attributes
    /// are auxiliary.
    pub fn build(&self) -> Vec<Class> {
        let schema = self.schema;
        let mut classes = Vec::new();

        classes.extend(schema.elements.iter().filter_map(|e| self.build_element(e)));
        classes.extend(
            schema
                .complex_types
                .iter()
                .filter_map(|ct| self.build_complex_type(ct)),
        );
        classes.extend(
            schema
                .simple_types
                .iter()
                .filter_map(|st| self.build_simple_type(st)),
        );
        classes.extend(schema.groups.iter().map(|g| self.build_group(g)));
        classes.extend(
            schema
                .attribute_groups
                .iter()
                .map(|g| self.build_attribute_group(g)),
        );
        classes.extend(schema.attributes.iter().filter_map(|a| self.build_attribute(a)));

        classes
    }

    fn class(&self, name: &str, tag: Tag, is_root: bool, help: Option<&String>) -> Class {
        let mut class = Class::new(name, tag, is_root);
        class.namespace = self.schema.target_namespace.clone();
        class.help = help.cloned();
        class
    }

    fn build_element(&self, decl: &ElementDecl) -> Option<Class> {
        let name = decl.name.as_deref()?;
        let mut class = self.class(name, Tag::Element, true, decl.help.as_ref());

        if let Some(type_name) = &decl.type_name {
            class.extensions.push(type_name.clone());
        } else if let Some(complex_type) = &decl.complex_type {
            self.fill_complex(&mut class, complex_type);
        } else if let Some(simple_type) = &decl.simple_type {
            let mut attr = Attr::new("value", simple_base(simple_type), Tag::Extension);
            apply_facets(&mut attr, &simple_type.facets);
            class.attrs.push(attr);
        } else {
            class.extensions.push(ANY_TYPE.to_string());
        }

        Some(class)
    }

    fn build_complex_type(&self, complex_type: &ComplexType) -> Option<Class> {
        let name = complex_type.name.as_deref()?;
        let mut class = self.class(name, Tag::ComplexType, true, complex_type.help.as_ref());
        self.fill_complex(&mut class, complex_type);
        Some(class)
    }

    fn fill_complex(&self, class: &mut Class, complex_type: &ComplexType) {
        if let Some(base) = &complex_type.base {
            if complex_type.simple_content {
                class.attrs.push(Attr::new("value", base.clone(), Tag::Extension));
            } else {
                class.extensions.push(base.clone());
            }
        }

        for particle in &complex_type.particles {
            self.add_particle(class, particle);
        }

        for decl in &complex_type.attributes {
            if let Some(attr) = self.attribute_attr(decl) {
                class.attrs.push(attr);
            }
        }

        for group in &complex_type.attribute_groups {
            class
                .attrs
                .push(Attr::new(local_part(group), group.clone(), Tag::AttributeGroup));
        }

        if complex_type.any_attribute {
            class
                .attrs
                .push(Attr::new("any_attributes", ANY_SIMPLE_TYPE, Tag::AnyAttribute));
        }
    }

    fn add_particle(&self, class: &mut Class, particle: &Particle) {
        match particle {
            Particle::Element(decl) => {
                if let Some(attr) = self.element_attr(class, decl) {
                    class.attrs.push(attr);
                }
            }
            Particle::Group {
                ref_name,
                min_occurs,
                max_occurs,
            } => {
                let mut attr = Attr::new(local_part(ref_name), ref_name.clone(), Tag::Group);
                attr.min_occurs = *min_occurs;
                attr.max_occurs = *max_occurs;
                class.attrs.push(attr);
            }
            Particle::Any {
                namespace,
                min_occurs,
                max_occurs,
            } => {
                let mut attr = Attr::new("any_element", ANY_TYPE, Tag::Any);
                attr.namespace = namespace.clone();
                attr.min_occurs = *min_occurs;
                attr.max_occurs = *max_occurs;
                class.attrs.push(attr);
            }
        }
    }

    /// Field for an element particle, registering an inner class for an
    /// anonymous complex type
    fn element_attr(&self, class: &mut Class, decl: &ElementDecl) -> Option<Attr> {
        let name = decl
            .name
            .as_deref()
            .or_else(|| decl.ref_name.as_deref().map(local_part))?;

        let mut attr = match (&decl.type_name, &decl.ref_name) {
            (Some(type_name), _) => Attr::new(name, type_name.clone(), Tag::Element),
            (None, Some(ref_name)) => Attr::new(name, ref_name.clone(), Tag::Element),
            (None, None) => {
                if let Some(complex_type) = &decl.complex_type {
                    let mut inner =
                        self.class(name, Tag::ComplexType, false, decl.help.as_ref());
                    self.fill_complex(&mut inner, complex_type);
                    class.inner.push(inner);

                    let mut attr = Attr::new(name, name, Tag::Element);
                    attr.forward_ref = true;
                    attr
                } else if let Some(simple_type) = &decl.simple_type {
                    let mut attr = Attr::new(name, simple_base(simple_type), Tag::Element);
                    apply_facets(&mut attr, &simple_type.facets);
                    attr
                } else {
                    Attr::new(name, ANY_TYPE, Tag::Element)
                }
            }
        };

        attr.namespace = self.schema.target_namespace.clone();
        attr.help = decl.help.clone();
        attr.default = decl.default.clone().or_else(|| decl.fixed.clone());
        attr.min_occurs = decl.min_occurs;
        attr.max_occurs = decl.max_occurs;
        if decl.min_occurs.unwrap_or(1) > 0 && !decl.nillable {
            attr.required = Some(true);
        }

        Some(attr)
    }

    fn attribute_attr(&self, decl: &AttributeDecl) -> Option<Attr> {
        let name = decl
            .name
            .as_deref()
            .or_else(|| decl.ref_name.as_deref().map(local_part))?;

        let type_name = decl
            .type_name
            .clone()
            .or_else(|| decl.simple_type.as_ref().map(simple_base))
            .or_else(|| decl.ref_name.clone())
            .unwrap_or_else(|| ANY_SIMPLE_TYPE.to_string());

        let mut attr = Attr::new(name, type_name, Tag::Attribute);
        if let Some(simple_type) = &decl.simple_type {
            apply_facets(&mut attr, &simple_type.facets);
        }
        attr.help = decl.help.clone();
        attr.default = decl.default.clone().or_else(|| decl.fixed.clone());
        if decl.required {
            attr.required = Some(true);
        }

        Some(attr)
    }

    fn build_simple_type(&self, simple_type: &SimpleType) -> Option<Class> {
        let name = simple_type.name.as_deref()?;
        let is_enum = !simple_type.enumerations.is_empty();
        let mut class = self.class(name, Tag::SimpleType, is_enum, simple_type.help.as_ref());

        if is_enum {
            let base = simple_base(simple_type);
            for value in &simple_type.enumerations {
                let mut attr = Attr::new(value.clone(), base.clone(), Tag::Enumeration);
                attr.default = Some(value.clone());
                class.attrs.push(attr);
            }
            return Some(class);
        }

        let mut attr = match &simple_type.variety {
            SimpleVariety::Restriction => {
                Attr::new("value", simple_base(simple_type), Tag::Restriction)
            }
            SimpleVariety::List { item_type } => {
                let mut attr = Attr::new(
                    "value",
                    item_type.clone().unwrap_or_else(|| ANY_SIMPLE_TYPE.to_string()),
                    Tag::List,
                );
                attr.max_occurs = Some(UNBOUNDED);
                attr
            }
            SimpleVariety::Union { member_types } => {
                let type_name = if member_types.is_empty() {
                    ANY_SIMPLE_TYPE.to_string()
                } else {
                    member_types.join(" ")
                };
                Attr::new("value", type_name, Tag::Union)
            }
        };
        apply_facets(&mut attr, &simple_type.facets);
        class.attrs.push(attr);

        Some(class)
    }

    fn build_group(&self, group: &Group) -> Class {
        let mut class = self.class(&group.name, Tag::Group, false, group.help.as_ref());
        for particle in &group.particles {
            self.add_particle(&mut class, particle);
        }
        class
    }

    fn build_attribute_group(&self, group: &AttributeGroup) -> Class {
        let mut class = self.class(&group.name, Tag::AttributeGroup, false, group.help.as_ref());
        let complex_type = ComplexType {
            attributes: group.attributes.clone(),
            attribute_groups: group.attribute_groups.clone(),
            any_attribute: group.any_attribute,
            ..Default::default()
        };
        self.fill_complex(&mut class, &complex_type);
        class
    }

    fn build_attribute(&self, decl: &AttributeDecl) -> Option<Class> {
        let name = decl.name.as_deref()?;
        let mut class = self.class(name, Tag::Attribute, false, decl.help.as_ref());
        class.attrs.push(self.attribute_attr(decl)?);
        Some(class)
    }
}

fn simple_base(simple_type: &SimpleType) -> String {
    simple_type
        .base
        .clone()
        .unwrap_or_else(|| STRING.to_string())
}

fn apply_facets(attr: &mut Attr, facets: &Facets) {
    attr.min_exclusive = facets.min_exclusive;
    attr.min_inclusive = facets.min_inclusive;
    attr.max_exclusive = facets.max_exclusive;
    attr.max_inclusive = facets.max_inclusive;
    attr.min_length = facets.min_length;
    attr.max_length = facets.max_length;
    attr.length = facets.length;
    attr.total_digits = facets.total_digits;
    attr.fraction_digits = facets.fraction_digits;
    attr.white_space = facets.white_space.clone();
    attr.pattern = facets.pattern.clone();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::SchemaParser;
    use pretty_assertions::assert_eq;

    fn build(xml: &str) -> Vec<Class> {
        let schema = SchemaParser::new(Some("file:///s/main.xsd".to_string()))
            .parse(xml.as_bytes())
            .unwrap();
        ClassBuilder::new(&schema).build()
    }

    #[test]
    fn test_root_and_auxiliary_classes() {
        let classes = build(
            r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema" targetNamespace="urn:t">
  <xs:element name="order" type="Order"/>
  <xs:complexType name="Order"><xs:sequence><xs:element name="id" type="xs:int"/></xs:sequence></xs:complexType>
  <xs:simpleType name="Code"><xs:restriction base="xs:string"><xs:maxLength value="3"/></xs:restriction></xs:simpleType>
  <xs:group name="Items"><xs:sequence><xs:element name="item" type="xs:string"/></xs:sequence></xs:group>
  <xs:attribute name="lang" type="xs:language"/>
</xs:schema>"#,
        );

        let summary: Vec<_> = classes
            .iter()
            .map(|c| (c.name.as_str(), c.class_type, c.is_root))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("order", Tag::Element, true),
                ("Order", Tag::ComplexType, true),
                ("Code", Tag::SimpleType, false),
                ("Items", Tag::Group, false),
                ("lang", Tag::Attribute, false),
            ]
        );
        assert!(classes.iter().all(|c| c.namespace.as_deref() == Some("urn:t")));
        assert_eq!(classes[0].extensions, vec!["Order".to_string()]);
        assert_eq!(classes[2].attrs[0].max_length, Some(3));
    }

    #[test]
    fn test_anonymous_type_becomes_inner_class() {
        let classes = build(
            r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">
  <xs:complexType name="Order">
    <xs:sequence>
      <xs:element name="line" maxOccurs="unbounded">
        <xs:complexType><xs:attribute name="qty" type="xs:int" use="required"/></xs:complexType>
      </xs:element>
    </xs:sequence>
  </xs:complexType>
</xs:schema>"#,
        );

        let order = &classes[0];
        assert_eq!(order.inner.len(), 1);
        assert_eq!(order.inner[0].name, "line");
        assert!(!order.inner[0].is_root);
        assert_eq!(order.inner[0].attrs[0].required, Some(true));

        let line = &order.attrs[0];
        assert!(line.forward_ref);
        assert!(line.is_list());
        assert_eq!(line.type_name, "line");
    }

    #[test]
    fn test_enumeration_class() {
        let classes = build(
            r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">
  <xs:simpleType name="Color">
    <xs:restriction base="xs:string">
      <xs:enumeration value="red"/><xs:enumeration value="green"/>
    </xs:restriction>
  </xs:simpleType>
</xs:schema>"#,
        );

        let color = &classes[0];
        assert!(color.is_root);
        assert!(color.is_enumeration());
        assert_eq!(color.attrs.len(), 2);
        assert_eq!(color.attrs[1].default.as_deref(), Some("green"));
    }

    #[test]
    fn test_simple_content_and_references() {
        let classes = build(
            r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">
  <xs:complexType name="Price">
    <xs:simpleContent>
      <xs:extension base="xs:decimal"><xs:attribute name="currency" type="xs:string"/></xs:extension>
    </xs:simpleContent>
  </xs:complexType>
  <xs:complexType name="Item">
    <xs:sequence><xs:group ref="Common" minOccurs="0"/><xs:any maxOccurs="unbounded"/></xs:sequence>
    <xs:attributeGroup ref="Audit"/>
  </xs:complexType>
</xs:schema>"#,
        );

        let price = &classes[0];
        assert_eq!(price.attrs[0].local_type, Tag::Extension);
        assert_eq!(price.attrs[0].type_name, "xs:decimal");
        assert_eq!(price.attrs[1].local_type, Tag::Attribute);
        assert!(price.extensions.is_empty());

        let tags: Vec<_> = classes[1].attrs.iter().map(|a| a.local_type).collect();
        assert_eq!(tags, vec![Tag::Group, Tag::Any, Tag::AttributeGroup]);
        assert_eq!(classes[1].attrs[0].min_occurs, Some(0));
    }
}
