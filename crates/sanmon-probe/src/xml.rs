//! Typed decoding of the controller XML API.
//!
//! Responses are `/RESPONSE/OBJECT/PROPERTY` trees where each PROPERTY
//! carries a `name` attribute and its value as text. [`ApiResponse`] is
//! the single conversion boundary out of the wire format: callers only
//! ever see named properties and ordered (identifier, health) pairs, so
//! a future JSON transport only needs to reproduce this surface.

use std::collections::BTreeMap;

use quick_xml::Reader;
use quick_xml::events::Event;

/// A decoded API response: one property map per `OBJECT` element, in
/// document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    objects: Vec<BTreeMap<String, String>>,
}

impl ApiResponse {
    pub fn parse(bytes: &[u8]) -> Result<Self, quick_xml::Error> {
        let mut reader = Reader::from_reader(bytes);
        reader.config_mut().trim_text(true);

        let mut objects: Vec<BTreeMap<String, String>> = Vec::new();
        let mut current_property: Option<String> = None;
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => match e.name().as_ref() {
                    b"OBJECT" => {
                        objects.push(BTreeMap::new());
                        current_property = None;
                    }
                    b"PROPERTY" => {
                        current_property = e
                            .try_get_attribute("name")
                            .map_err(quick_xml::Error::from)?
                            .map(|attr| {
                                attr.unescape_value()
                                    .map(|v| v.into_owned())
                                    .map_err(quick_xml::Error::from)
                            })
                            .transpose()?;
                    }
                    _ => {}
                },
                Event::Text(t) => {
                    if let (Some(name), Some(object)) =
                        (current_property.as_ref(), objects.last_mut())
                    {
                        let value = t.unescape().map_err(quick_xml::Error::from)?;
                        object.insert(name.clone(), value.into_owned());
                    }
                }
                Event::End(e) => {
                    if e.name().as_ref() == b"PROPERTY" {
                        current_property = None;
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(ApiResponse { objects })
    }

    /// First occurrence of a named property across all objects.
    ///
    /// Used for scalar responses such as the login session token.
    pub fn property(&self, name: &str) -> Option<&str> {
        self.objects
            .iter()
            .find_map(|object| object.get(name).map(String::as_str))
    }

    /// Ordered (identifier value, health value) pairs, one per object
    /// that carries both `id_attr` and a `health` property. Objects
    /// missing either property are skipped.
    pub fn records(&self, id_attr: &str) -> Vec<(String, String)> {
        self.objects
            .iter()
            .filter_map(|object| {
                let identifier = object.get(id_attr)?;
                let health = object.get("health")?;
                Some((identifier.clone(), health.clone()))
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOGIN: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<RESPONSE>
  <OBJECT basetype="status" name="status" oid="1">
    <PROPERTY name="response-type">success</PROPERTY>
    <PROPERTY name="response">a1b2c3d4e5</PROPERTY>
  </OBJECT>
</RESPONSE>"#;

    const CONTROLLERS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<RESPONSE>
  <OBJECT basetype="controllers" name="controller" oid="1">
    <PROPERTY name="durable-id">controller_a</PROPERTY>
    <PROPERTY name="health">OK</PROPERTY>
  </OBJECT>
  <OBJECT basetype="controllers" name="controller" oid="2">
    <PROPERTY name="durable-id">controller_b</PROPERTY>
    <PROPERTY name="health">Degraded</PROPERTY>
  </OBJECT>
  <OBJECT basetype="status" name="status" oid="3">
    <PROPERTY name="response-type">success</PROPERTY>
  </OBJECT>
</RESPONSE>"#;

    #[test]
    fn extracts_login_token() {
        let response = ApiResponse::parse(LOGIN.as_bytes()).unwrap();
        assert_eq!(response.property("response"), Some("a1b2c3d4e5"));
    }

    #[test]
    fn missing_property_is_none() {
        let response = ApiResponse::parse(LOGIN.as_bytes()).unwrap();
        assert_eq!(response.property("no-such-property"), None);
    }

    #[test]
    fn records_follow_document_order() {
        let response = ApiResponse::parse(CONTROLLERS.as_bytes()).unwrap();
        let records = response.records("durable-id");
        assert_eq!(
            records,
            vec![
                ("controller_a".to_string(), "OK".to_string()),
                ("controller_b".to_string(), "Degraded".to_string()),
            ]
        );
    }

    #[test]
    fn objects_without_the_attribute_are_skipped() {
        // The trailing status object has no durable-id and no health.
        let response = ApiResponse::parse(CONTROLLERS.as_bytes()).unwrap();
        assert_eq!(response.records("durable-id").len(), 2);
        assert!(response.records("volume-name").is_empty());
    }

    #[test]
    fn object_with_identifier_but_no_health_is_skipped() {
        let xml = r#"<RESPONSE>
  <OBJECT><PROPERTY name="durable-id">controller_a</PROPERTY></OBJECT>
</RESPONSE>"#;
        let response = ApiResponse::parse(xml.as_bytes()).unwrap();
        assert!(response.records("durable-id").is_empty());
    }

    #[test]
    fn escaped_text_is_unescaped() {
        let xml = r#"<RESPONSE>
  <OBJECT>
    <PROPERTY name="durable-id">a&amp;b</PROPERTY>
    <PROPERTY name="health">OK</PROPERTY>
  </OBJECT>
</RESPONSE>"#;
        let response = ApiResponse::parse(xml.as_bytes()).unwrap();
        assert_eq!(response.records("durable-id")[0].0, "a&b");
    }

    #[test]
    fn malformed_xml_is_an_error() {
        assert!(ApiResponse::parse(b"<RESPONSE><OBJECT></RESPONSE>").is_err());
    }

    #[test]
    fn parse_is_deterministic() {
        let first = ApiResponse::parse(CONTROLLERS.as_bytes()).unwrap();
        let second = ApiResponse::parse(CONTROLLERS.as_bytes()).unwrap();
        assert_eq!(first, second);
    }
}
