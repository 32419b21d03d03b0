//! Type-name parser
//!
//! Resolves class-name strings such as `UTF8Type`,
//! `org.apache.cassandra.db.marshal.ListType(Int32Type)` or a registered
//! external class into marshalling descriptors.
//!
//! Grammar:
//!
//! ```text
//! type   := name params?
//! name   := [A-Za-z0-9_.&+-]+
//! params := '(' ')' | '(' param (',' param)* ')'
//! param  := type | name? ':' type | ε
//! ```
//!
//! Parsing happens in two passes. The syntax pass builds a `TypeExpr` tree
//! with winnow and reports lexical problems as syntax errors. The resolution
//! pass looks the names up: names without a package are looked up in
//! [`MARSHAL_PACKAGE`], and names that do not resolve to a known class, or
//! resolve with the wrong parameters, are configuration errors.

use crate::abstract_type::{is_identifier_char, marshal_simple_name, qualify};
use crate::{AbstractType, ClassName, UserType};
use cql3_diagnostics::{
    CQL0001, CQL0002, CQL0003, CQL0004, CQL0005, CQL0006, CQL0300, CQL0301, CQL0302, Cql3Error,
    Result,
};
use indexmap::IndexSet;
use std::sync::Arc;
use winnow::ModalResult;
use winnow::ascii::multispace0;
use winnow::combinator::{cut_err, fail, opt, separated};
use winnow::error::{ContextError, ErrMode, StrContext};
use winnow::prelude::*;
use winnow::token::take_while;

/// Deepest parameter nesting accepted in a type name
pub const MAX_NESTING: usize = 64;

/// Parser for marshalling type names
#[derive(Debug, Clone, Default)]
pub struct TypeParser {
    external: IndexSet<String>,
}

/// Builder for a [`TypeParser`] that knows about extra loadable classes
#[derive(Debug, Default)]
pub struct TypeParserBuilder {
    external: IndexSet<String>,
}

impl TypeParserBuilder {
    /// Make a class loadable under the given name
    pub fn register(mut self, class_name: impl AsRef<str>) -> Self {
        self.external.insert(qualify(class_name.as_ref()));
        self
    }

    pub fn build(self) -> TypeParser {
        log::trace!("type parser knows {} external class(es)", self.external.len());
        TypeParser {
            external: self.external,
        }
    }
}

impl TypeParser {
    /// Parser that only knows the built-in classes
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> TypeParserBuilder {
        TypeParserBuilder::default()
    }

    /// Parse a type name into a descriptor
    ///
    /// A blank name resolves to `BytesType`.
    pub fn parse(&self, input: &str) -> Result<Arc<AbstractType>> {
        if input.trim().is_empty() {
            return Ok(Arc::new(AbstractType::Bytes));
        }

        let result = parse_type_expr(input)
            .and_then(|expr| self.resolve(&expr, input))
            .map(Arc::new);
        match &result {
            Ok(ty) => log::debug!("resolved type name '{}' to {}", input, ty),
            Err(err) => log::debug!("failed to resolve type name '{}': {}", input, err),
        }
        result
    }

    fn resolve(&self, expr: &TypeExpr<'_>, whole: &str) -> Result<AbstractType> {
        let class_name = qualify(expr.name);
        let params = expr.params.as_deref();

        if let Some(simple) = marshal_simple_name(&class_name) {
            if let Some(ty) = AbstractType::builtin(simple) {
                no_params(&class_name, params)?;
                return Ok(ty);
            }

            match simple {
                "ReversedType" => {
                    let [base] = self.type_params::<1>(&class_name, params, whole)?;
                    return Ok(AbstractType::reversed(base));
                }
                "ListType" => {
                    let [elements] = self.type_params::<1>(&class_name, params, whole)?;
                    return Ok(AbstractType::list(elements));
                }
                "SetType" => {
                    let [elements] = self.type_params::<1>(&class_name, params, whole)?;
                    return Ok(AbstractType::set(elements));
                }
                "MapType" => {
                    let [keys, values] = self.type_params::<2>(&class_name, params, whole)?;
                    return Ok(AbstractType::map(keys, values));
                }
                "UserType" => {
                    return self
                        .user_type(&class_name, params.unwrap_or_default(), whole)
                        .map(AbstractType::user);
                }
                _ => {}
            }
        }

        if self.external.contains(&class_name) {
            no_params(&class_name, params)?;
            return ClassName::new(&class_name).map(AbstractType::External);
        }

        Err(Cql3Error::configuration(
            CQL0300,
            format!("Unable to find abstract-type class '{}'", class_name),
        )
        .with_context(whole))
    }

    fn type_params<const N: usize>(
        &self,
        class_name: &str,
        params: Option<&[Param<'_>]>,
        whole: &str,
    ) -> Result<[Arc<AbstractType>; N]> {
        let arity_error = |got: usize| {
            Cql3Error::configuration(
                CQL0301,
                format!("{} takes exactly {} type parameter(s), got {}", class_name, N, got),
            )
        };

        let params = params.unwrap_or_default();
        if params.len() != N {
            return Err(arity_error(params.len()));
        }

        params
            .iter()
            .map(|param| match param {
                Param::Type(expr) => self.resolve(expr, whole).map(Arc::new),
                Param::Empty => Err(Cql3Error::syntax(CQL0004, "empty type parameter", whole)),
                Param::Field { name, .. } => Err(Cql3Error::syntax(
                    CQL0001,
                    format!("unexpected field '{}:' in type parameters", name),
                    whole,
                )),
            })
            .collect::<Result<Vec<_>>>()?
            .try_into()
            .map_err(|parsed: Vec<_>| arity_error(parsed.len()))
    }

    fn user_type(&self, class_name: &str, params: &[Param<'_>], whole: &str) -> Result<UserType> {
        let [keyspace, name, fields @ ..] = params else {
            return Err(Cql3Error::configuration(
                CQL0301,
                format!(
                    "{} needs a keyspace and a name, got {} parameter(s)",
                    class_name,
                    params.len()
                ),
            ));
        };

        let keyspace = decode_hex(hex_param(keyspace, whole)?, whole)?;
        let keyspace = String::from_utf8(keyspace)
            .map_err(|_| Cql3Error::syntax(CQL0005, "keyspace name is not valid UTF-8", whole))?;
        let name = decode_hex(hex_param(name, whole)?, whole)?;

        let mut user_type = UserType::new(keyspace, name);

        for field in fields {
            let Param::Field { name, ty } = field else {
                return Err(Cql3Error::syntax(
                    CQL0001,
                    "expected '<hex name>:<type>' for user type field",
                    whole,
                ));
            };
            let ty = self.resolve(ty, whole).map(Arc::new)?;
            user_type = user_type.with_field(decode_hex(name, whole)?, ty);
        }

        Ok(user_type)
    }
}

// === Syntax pass ===

/// A parsed but unresolved type name
#[derive(Debug, Clone, PartialEq, Eq)]
struct TypeExpr<'a> {
    name: &'a str,
    params: Option<Vec<Param<'a>>>,
}

/// One entry of a parameter list
#[derive(Debug, Clone, PartialEq, Eq)]
enum Param<'a> {
    Type(TypeExpr<'a>),
    /// `<hex name>:<type>`, used by user type fields
    Field { name: &'a str, ty: TypeExpr<'a> },
    /// Nothing between two separators; an empty hex name in user types
    Empty,
}

const TYPE_NAME: &str = "type name";
const CLOSING_PAREN: &str = "closing parenthesis";
const NESTING: &str = "nesting depth";

fn parse_type_expr(whole: &str) -> Result<TypeExpr<'_>> {
    let mut input = whole.trim_start();
    let expr = type_expr(&mut input, 0).map_err(|err| syntax_error(&err, whole))?;

    let rest = input.trim_start();
    match rest.chars().next() {
        None => Ok(expr),
        Some(')') => Err(Cql3Error::syntax(CQL0002, "unexpected ')'", whole)),
        Some(c) if !is_identifier_char(c) => Err(Cql3Error::syntax(
            CQL0001,
            format!("illegal character '{}'", c),
            whole,
        )),
        Some(_) => Err(Cql3Error::syntax(
            CQL0003,
            format!("unexpected '{}' after type", rest),
            whole,
        )),
    }
}

fn type_expr<'a>(input: &mut &'a str, depth: usize) -> ModalResult<TypeExpr<'a>> {
    if depth > MAX_NESTING {
        return cut_err(fail)
            .context(StrContext::Label(NESTING))
            .parse_next(input);
    }

    let name = class_name(input)?;
    ws(input)?;
    let params = if input.starts_with('(') {
        Some(param_list(input, depth)?)
    } else {
        None
    };

    Ok(TypeExpr { name, params })
}

fn class_name<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    cut_err(take_while(1.., is_identifier_char))
        .context(StrContext::Label(TYPE_NAME))
        .parse_next(input)
}

fn param_list<'a>(input: &mut &'a str, depth: usize) -> ModalResult<Vec<Param<'a>>> {
    token('(').parse_next(input)?;
    ws(input)?;
    if opt(token(')')).parse_next(input)?.is_some() {
        return Ok(Vec::new());
    }

    let params: Vec<Param<'a>> =
        separated(1.., |i: &mut &'a str| param(i, depth + 1), token(',')).parse_next(input)?;
    cut_err(token(')'))
        .context(StrContext::Label(CLOSING_PAREN))
        .parse_next(input)?;

    Ok(params)
}

fn param<'a>(input: &mut &'a str, depth: usize) -> ModalResult<Param<'a>> {
    ws(input)?;
    if input.is_empty() || input.starts_with([',', ')']) {
        return Ok(Param::Empty);
    }

    // A field whose hex name is empty
    if opt(token(':')).parse_next(input)?.is_some() {
        return field_type(input, depth).map(|ty| Param::Field { name: "", ty });
    }

    let expr = type_expr(input, depth)?;
    ws(input)?;
    if expr.params.is_none() && opt(token(':')).parse_next(input)?.is_some() {
        return field_type(input, depth).map(|ty| Param::Field {
            name: expr.name,
            ty,
        });
    }

    Ok(Param::Type(expr))
}

fn field_type<'a>(input: &mut &'a str, depth: usize) -> ModalResult<TypeExpr<'a>> {
    ws(input)?;
    let ty = type_expr(input, depth)?;
    ws(input)?;
    Ok(ty)
}

fn ws(input: &mut &str) -> ModalResult<()> {
    multispace0.void().parse_next(input)
}

fn token<'a>(expected: char) -> impl Parser<&'a str, char, ErrMode<ContextError>> {
    expected
}

/// Map a winnow failure onto the syntax error codes
fn syntax_error(err: &ErrMode<ContextError>, whole: &str) -> Cql3Error {
    let label = match err {
        ErrMode::Backtrack(e) | ErrMode::Cut(e) => e.context().find_map(|ctx| match ctx {
            StrContext::Label(label) => Some(*label),
            _ => None,
        }),
        ErrMode::Incomplete(_) => None,
    };

    match label {
        Some(NESTING) => Cql3Error::syntax(
            CQL0006,
            format!("type parameters nest deeper than {} levels", MAX_NESTING),
            whole,
        ),
        Some(CLOSING_PAREN) => {
            Cql3Error::syntax(CQL0002, "expected ',' or ')' in type parameters", whole)
        }
        _ => Cql3Error::syntax(CQL0001, "expected a type name", whole),
    }
}

// === Resolution helpers ===

fn hex_param<'a>(param: &Param<'a>, whole: &str) -> Result<&'a str> {
    match param {
        Param::Empty => Ok(""),
        Param::Type(TypeExpr { name, params: None }) => Ok(*name),
        _ => Err(Cql3Error::syntax(CQL0005, "expected a hex-encoded name", whole)),
    }
}

fn no_params(class_name: &str, params: Option<&[Param<'_>]>) -> Result<()> {
    match params {
        Some(params) if !params.is_empty() => Err(Cql3Error::configuration(
            CQL0302,
            format!("{} does not take type parameters", class_name),
        )),
        _ => Ok(()),
    }
}

fn decode_hex(text: &str, whole: &str) -> Result<Vec<u8>> {
    hex::decode(text).map_err(|e| {
        Cql3Error::syntax(CQL0005, format!("invalid hex name '{}': {}", text, e), whole)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn syntax(input: &str) -> TypeExpr<'_> {
        parse_type_expr(input).unwrap()
    }

    fn bare(name: &str) -> TypeExpr<'_> {
        TypeExpr { name, params: None }
    }

    #[test]
    fn test_params_respect_nesting() {
        let expr = syntax("A(B, C(D, E), F)");
        assert_eq!(
            expr.params,
            Some(vec![
                Param::Type(bare("B")),
                Param::Type(TypeExpr {
                    name: "C",
                    params: Some(vec![Param::Type(bare("D")), Param::Type(bare("E"))]),
                }),
                Param::Type(bare("F")),
            ])
        );
    }

    #[test]
    fn test_empty_param_list() {
        assert_eq!(syntax("A()").params, Some(vec![]));
        assert_eq!(syntax("A(  )").params, Some(vec![]));
        assert_eq!(syntax("A").params, None);
    }

    #[test]
    fn test_fields_and_empty_params() {
        let expr = syntax("UserType(,61, 62 : B, :C)");
        assert_eq!(
            expr.params,
            Some(vec![
                Param::Empty,
                Param::Type(bare("61")),
                Param::Field { name: "62", ty: bare("B") },
                Param::Field { name: "", ty: bare("C") },
            ])
        );
    }

    #[test]
    fn test_unbalanced_params() {
        let err = parse_type_expr("A(B, C(D)").unwrap_err();
        assert_eq!(err.code(), CQL0002);
    }

    #[test]
    fn test_trailing_input() {
        let err = parse_type_expr("A(B) C").unwrap_err();
        assert_eq!(err.code(), CQL0003);
    }

    #[test]
    fn test_nesting_limit() {
        let at_limit = format!("{}B{}", "A(".repeat(MAX_NESTING), ")".repeat(MAX_NESTING));
        assert!(parse_type_expr(&at_limit).is_ok());

        let over = format!("{}B{}", "A(".repeat(MAX_NESTING + 1), ")".repeat(MAX_NESTING + 1));
        assert_eq!(parse_type_expr(&over).unwrap_err().code(), CQL0006);
    }

    #[test]
    fn test_builder_qualifies_registered_names() {
        let parser = TypeParser::builder().register("MyType").build();
        let ty = parser.parse("org.apache.cassandra.db.marshal.MyType").unwrap();
        assert_eq!(ty.as_ref(), &AbstractType::external("MyType").unwrap());
    }
}
