//! The recursive, precedence-driven writer core and its entry points.
//!
//! [`Writer::write_term`] drives everything: it dispatches on the term
//! kind, derives operand priority contexts from the operator registry,
//! applies the quoting, float-formatting and token-boundary machinery, and
//! pushes characters to the sink.  An expression is parenthesized exactly
//! when printing it bare inside the caller's priority context would change
//! how a reader re-associates it.

use crate::classify::{needs_space, Last};
use crate::error::WriteError;
use crate::float::format_float;
use crate::oper::{Fixity, OperDef, MAX_OPER_PREC};
use crate::options::{AttributeMode, BlobMode, Spacing, WriteOptions};
use crate::quote::{needs_quotes, push_quoted};
use crate::sink::Sink;
use crate::visited::VisitedSet;
use crate::{Arena, Term, VarId, View};

/// Priority context for arguments of canonical compounds, list elements,
/// and attribute terms: just below the comma operator.
const ARG_PREC: u16 = 999;

/// Marker emitted in place of a subterm beyond the depth limit.
const ELLIPSIS: &str = "...";

/// A user hook consulted before the default rendering of a subterm.
///
/// Return `Ok(true)` after writing a replacement rendering to `sink`;
/// return `Ok(false)` to decline and let the default rendering run.  Hook
/// output is taken as self-delimiting: the writer will not insert a
/// boundary space between it and the following token.
pub trait Portray {
    fn portray(&self, arena: &Arena, term: Term, sink: &mut dyn Sink) -> Result<bool, WriteError>;
}

/// A reusable writing surface over one arena and one sink.
///
/// The writer remembers the last character it emitted, so several calls
/// with [`WriteOptions::partial`] set compose into a single re-lexable
/// token stream.  A call without `partial` resets that state first.
pub struct Writer<'a, S: Sink> {
    arena: &'a Arena,
    sink: &'a mut S,
    portray: Option<&'a dyn Portray>,
    last: Last,
}

impl<'a, S: Sink> Writer<'a, S> {
    pub fn new(arena: &'a Arena, sink: &'a mut S) -> Self {
        Self {
            arena,
            sink,
            portray: None,
            last: Last::None,
        }
    }

    /// Attach a portray hook consulted per the `portray`/`blob_mode`/
    /// `attribute_mode` options.
    pub fn with_portray(mut self, hook: &'a dyn Portray) -> Self {
        self.portray = Some(hook);
        self
    }

    /// Write one term under `options`.
    ///
    /// A malformed options record is rejected before any output; sink
    /// failures abort mid-stream with no rollback.
    pub fn write_term(&mut self, term: Term, options: &WriteOptions) -> Result<(), WriteError> {
        options.validate()?;
        if !options.partial {
            self.last = Last::None;
        }
        log::trace!(
            "write_term: priority={} quoted={} ignore_ops={} module={}",
            options.priority,
            options.quoted,
            options.ignore_ops,
            options.module
        );

        let mut emit = Emit {
            arena: self.arena,
            sink: &mut *self.sink,
            portray: self.portray,
            opts: options,
            last: self.last,
            depth: 0,
            emitted: 0,
            visited: VisitedSet::new(),
        };
        let result = emit.term(term, options.priority, false);
        self.last = emit.last;
        log::trace!("write_term: {} chars emitted", emit.emitted);
        result
    }
}

/// Transient state of one write call.  Created per call, discarded on
/// return; nothing here survives or is shared.
struct Emit<'e, S: Sink> {
    arena: &'e Arena,
    sink: &'e mut S,
    portray: Option<&'e dyn Portray>,
    opts: &'e WriteOptions,
    last: Last,
    depth: u32,
    emitted: u64,
    visited: VisitedSet,
}

impl<S: Sink> Emit<'_, S> {
    fn raw(&mut self, c: char) -> Result<(), WriteError> {
        self.sink.put_char(c)?;
        self.last = Last::Char(c);
        self.emitted += 1;
        Ok(())
    }

    fn raw_str(&mut self, s: &str) -> Result<(), WriteError> {
        for c in s.chars() {
            self.raw(c)?;
        }
        Ok(())
    }

    /// Emit one complete token, inserting a boundary space first when the
    /// last emitted character would otherwise merge with it.
    fn token(&mut self, s: &str) -> Result<(), WriteError> {
        let Some(first) = s.chars().next() else {
            // The empty atom prints as nothing outside quoted mode.
            return Ok(());
        };
        if needs_space(self.last, first) {
            self.raw(' ')?;
        }
        self.raw_str(s)
    }

    /// An opening parenthesis that starts a parenthesized expression.
    ///
    /// Goes through the boundary guard: directly after an atom or prefix
    /// operator name a bare `(` would read as a compound-term head.
    fn open_paren(&mut self) -> Result<(), WriteError> {
        self.token("(")
    }

    fn close_paren(&mut self) -> Result<(), WriteError> {
        self.raw(')')
    }

    fn arg_sep(&mut self) -> Result<(), WriteError> {
        self.raw(',')?;
        if self.opts.spacing == Spacing::NextArgument {
            self.raw(' ')?;
        }
        Ok(())
    }

    fn ellipsis(&mut self) -> Result<(), WriteError> {
        self.token(ELLIPSIS)
    }

    fn depth_exceeded(&self) -> bool {
        matches!(self.opts.max_depth, Some(max) if self.depth >= max)
    }

    fn offer_portray(&mut self, term: Term) -> Result<bool, WriteError> {
        if let Some(hook) = self.portray {
            if hook.portray(self.arena, term, &mut *self.sink)? {
                // Hook output is self-delimiting.
                self.last = Last::None;
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Write `term` inside a context of priority `prec`.  `op_operand` is
    /// set when the term is the operand of an operator, where bare
    /// operator atoms and negative numerals would mislead the reader.
    fn term(&mut self, term: Term, prec: u16, op_operand: bool) -> Result<(), WriteError> {
        if self.depth_exceeded() {
            return self.ellipsis();
        }
        if self.opts.portray && self.offer_portray(term)? {
            return Ok(());
        }

        match term.view(self.arena)? {
            View::Int(i) => self.number(&i.to_string(), op_operand),
            View::Big(digits) => self.number(digits, op_operand),
            View::Real(f) => self.number(&format_float(f), op_operand),
            View::Atom(name) => self.atom(name, op_operand),
            View::Str(s) => self.string(s),
            View::Bin(bytes) => self.blob(term, bytes),
            View::Var(id) => self.variable(id, false),
            View::AttVar(id, attrs) => self.attvar(term, id, attrs),
            View::Func(name, args) => self.compound(term, name, args, prec, op_operand),
        }
    }

    /// A numeric token.  A negative numeral in operand position is
    /// parenthesized: bare, the reader could fold the sign into the
    /// surrounding operator expression.
    fn number(&mut self, text: &str, op_operand: bool) -> Result<(), WriteError> {
        if op_operand && text.starts_with('-') {
            self.open_paren()?;
            self.token(text)?;
            self.close_paren()
        } else {
            self.token(text)
        }
    }

    fn atom(&mut self, name: &str, op_operand: bool) -> Result<(), WriteError> {
        let embrace =
            op_operand && !self.opts.ignore_ops && self.arena.opers().lookup(name).is_some();
        if embrace {
            self.open_paren()?;
        }
        self.atom_text(name)?;
        if embrace {
            self.close_paren()?;
        }
        Ok(())
    }

    /// The printed form of an atom name: quoted and escaped when the
    /// options demand it and the text would not re-read as one token.
    fn atom_text(&mut self, name: &str) -> Result<(), WriteError> {
        if self.opts.quoted && needs_quotes(name) {
            let mut buf = String::new();
            push_quoted(&mut buf, name, '\'', self.opts.char_escapes)?;
            self.token(&buf)
        } else {
            self.token(name)
        }
    }

    fn string(&mut self, s: &str) -> Result<(), WriteError> {
        if self.opts.quoted {
            let quote = if self.opts.backquoted_string { '`' } else { '"' };
            let mut buf = String::new();
            push_quoted(&mut buf, s, quote, self.opts.char_escapes)?;
            self.token(&buf)
        } else {
            self.token(s)
        }
    }

    fn blob(&mut self, term: Term, bytes: &[u8]) -> Result<(), WriteError> {
        if self.opts.blob_mode == BlobMode::Portray && self.offer_portray(term)? {
            return Ok(());
        }
        self.token("hex{")?;
        for b in bytes {
            self.raw_str(&format!("{b:02X}"))?;
        }
        self.raw('}')
    }

    /// The reference name of a variable, derived from its identity:
    /// `_N` for plain variables, `_DN` for attributed ones.
    fn variable(&mut self, id: VarId, attributed: bool) -> Result<(), WriteError> {
        let mut name = String::from(if attributed { "_D" } else { "_" });
        name.push_str(&id.index().to_string());
        self.token(&name)
    }

    fn attvar(&mut self, term: Term, id: VarId, attrs: &[Term]) -> Result<(), WriteError> {
        match self.opts.attribute_mode {
            AttributeMode::Ignore => self.variable(id, true),
            AttributeMode::Dots => {
                self.variable(id, true)?;
                self.raw_str("{...}")
            }
            AttributeMode::Write | AttributeMode::Portray => {
                if self.visited.is_marked(id) {
                    // Revisit through shared structure: reference form only.
                    return self.variable(id, true);
                }
                self.visited.mark(id);
                if self.opts.attribute_mode == AttributeMode::Portray
                    && self.offer_portray(term)?
                {
                    return Ok(());
                }
                self.variable(id, true)?;
                self.raw('{')?;
                let depth0 = self.depth;
                self.depth += 1;
                for (i, attr) in attrs.iter().enumerate() {
                    if i > 0 {
                        self.arg_sep()?;
                    }
                    self.term(*attr, ARG_PREC, false)?;
                }
                self.depth = depth0;
                self.raw('}')
            }
        }
    }

    fn compound(
        &mut self,
        term: Term,
        name: &str,
        args: &[Term],
        prec: u16,
        op_operand: bool,
    ) -> Result<(), WriteError> {
        if self.opts.numbervars && args.len() == 1 {
            if let Some((letter, suffix)) = self.arena.numbervar_of(term) {
                let mut buf = String::new();
                buf.push(letter);
                if suffix > 0 {
                    buf.push_str(&suffix.to_string());
                }
                return self.token(&buf);
            }
        }

        // List and curly notation are not operators and survive ignore_ops.
        if name == "." && args.len() == 2 {
            return self.list(args[0], args[1]);
        }
        if name == "{}" && args.len() == 1 {
            return self.curly(args[0]);
        }

        if !self.opts.ignore_ops {
            if let Some(tab) = self.arena.opers().lookup(name) {
                match args.len() {
                    1 => {
                        if let Some(def) = tab.get(Fixity::Prefix) {
                            return self.prefix_op(name, *def, args[0], prec);
                        }
                        if let Some(def) = tab.get(Fixity::Postfix) {
                            return self.postfix_op(name, *def, args[0], prec);
                        }
                    }
                    2 => {
                        if let Some(def) = tab.get(Fixity::Infix) {
                            return self.infix_op(name, *def, args, prec);
                        }
                    }
                    _ => {}
                }
            }
        }

        self.canonical(name, args)
    }

    /// Canonical functional notation: `name(arg, ..)`.  The parenthesis
    /// must follow the functor directly; a guard space here would change
    /// the term the reader builds.
    fn canonical(&mut self, name: &str, args: &[Term]) -> Result<(), WriteError> {
        self.atom_text(name)?;
        self.raw('(')?;
        let depth0 = self.depth;
        self.depth += 1;
        for (i, arg) in args.iter().enumerate() {
            if i > 0 {
                self.arg_sep()?;
            }
            self.term(*arg, ARG_PREC, false)?;
        }
        self.depth = depth0;
        self.raw(')')
    }

    fn prefix_op(
        &mut self,
        name: &str,
        def: OperDef,
        arg: Term,
        prec: u16,
    ) -> Result<(), WriteError> {
        let wrap = def.prec > prec;
        if wrap {
            self.open_paren()?;
        }
        self.atom_text(name)?;
        if matches!(name, "-" | "+") {
            // A following digit or symbol would be folded into a signed
            // numeral or a longer symbolic atom.
            self.last = Last::PrefixSign;
        }
        let depth0 = self.depth;
        self.depth += 1;
        self.term(arg, def.right_prec(), true)?;
        self.depth = depth0;
        if wrap {
            self.close_paren()?;
        }
        Ok(())
    }

    fn infix_op(
        &mut self,
        name: &str,
        def: OperDef,
        args: &[Term],
        prec: u16,
    ) -> Result<(), WriteError> {
        let wrap = def.prec > prec;
        if wrap {
            self.open_paren()?;
        }
        let depth0 = self.depth;
        self.depth += 1;
        self.term(args[0], def.left_prec(), true)?;
        if name == "," {
            self.arg_sep()?;
        } else {
            self.atom_text(name)?;
        }
        self.term(args[1], def.right_prec(), true)?;
        self.depth = depth0;
        if wrap {
            self.close_paren()?;
        }
        Ok(())
    }

    fn postfix_op(
        &mut self,
        name: &str,
        def: OperDef,
        arg: Term,
        prec: u16,
    ) -> Result<(), WriteError> {
        let wrap = def.prec > prec;
        if wrap {
            self.open_paren()?;
        }
        let depth0 = self.depth;
        self.depth += 1;
        self.term(arg, def.left_prec(), true)?;
        self.depth = depth0;
        self.atom_text(name)?;
        if wrap {
            self.close_paren()?;
        }
        Ok(())
    }

    /// List notation over a `'.'/2` chain: `[a,b|Tail]`, eliding a `[]`
    /// tail.  Depth advances one level per element.
    fn list(&mut self, first_head: Term, first_tail: Term) -> Result<(), WriteError> {
        self.raw('[')?;
        let depth0 = self.depth;
        let mut head = first_head;
        let mut tail = first_tail;
        let mut leading = true;
        loop {
            self.depth += 1;
            if self.depth_exceeded() {
                if !leading {
                    self.raw('|')?;
                }
                self.ellipsis()?;
                break;
            }
            if !leading {
                self.arg_sep()?;
            }
            self.term(head, ARG_PREC, false)?;
            leading = false;
            match tail.view(self.arena)? {
                View::Atom("[]") => break,
                View::Func(".", rest) if rest.len() == 2 => {
                    head = rest[0];
                    tail = rest[1];
                }
                _ => {
                    self.raw('|')?;
                    self.term(tail, ARG_PREC, false)?;
                    break;
                }
            }
        }
        self.depth = depth0;
        self.raw(']')
    }

    fn curly(&mut self, inner: Term) -> Result<(), WriteError> {
        self.raw('{')?;
        let depth0 = self.depth;
        self.depth += 1;
        self.term(inner, MAX_OPER_PREC, false)?;
        self.depth = depth0;
        self.raw('}')
    }
}

/// Write `term` under an explicit options record.
pub fn write_term<S: Sink>(
    arena: &Arena,
    term: Term,
    options: &WriteOptions,
    sink: &mut S,
) -> Result<(), WriteError> {
    Writer::new(arena, sink).write_term(term, options)
}

/// `write/1`: operator notation, numbervars, no quoting.
pub fn write<S: Sink>(arena: &Arena, term: Term, sink: &mut S) -> Result<(), WriteError> {
    write_term(arena, term, &WriteOptions::plain(), sink)
}

/// `writeq/1`: quoted so the output reads back as the same term.
pub fn writeq<S: Sink>(arena: &Arena, term: Term, sink: &mut S) -> Result<(), WriteError> {
    write_term(arena, term, &WriteOptions::quoted(), sink)
}

/// `print/1`: like [`write`], offering every subterm to `hook` first.
pub fn print<S: Sink>(
    arena: &Arena,
    term: Term,
    hook: &dyn Portray,
    sink: &mut S,
) -> Result<(), WriteError> {
    Writer::new(arena, sink)
        .with_portray(hook)
        .write_term(term, &WriteOptions::print())
}

/// `write_canonical/1`: quoted functional notation.
pub fn write_canonical<S: Sink>(
    arena: &Arena,
    term: Term,
    sink: &mut S,
) -> Result<(), WriteError> {
    write_term(arena, term, &WriteOptions::canonical(), sink)
}

/// Quoted, newline-terminated form for debugging.
pub fn writeln<S: Sink>(arena: &Arena, term: Term, sink: &mut S) -> Result<(), WriteError> {
    writeq(arena, term, sink)?;
    sink.put_char('\n')?;
    Ok(())
}

/// Render `term` into a fresh `String`.
pub fn term_to_string(
    arena: &Arena,
    term: Term,
    options: &WriteOptions,
) -> Result<String, WriteError> {
    let mut out = String::new();
    write_term(arena, term, options, &mut out)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oper::Assoc;
    use crate::sink::SinkError;

    fn arena() -> Arena {
        Arena::with_standard_opers()
    }

    fn rendered(arena: &Arena, term: Term, options: &WriteOptions) -> String {
        term_to_string(arena, term, options).unwrap()
    }

    fn wq(arena: &Arena, term: Term) -> String {
        rendered(arena, term, &WriteOptions::quoted())
    }

    #[test]
    fn atoms() {
        let mut a = arena();
        let plain = a.atom("foo");
        let odd = a.atom("hello world");
        assert_eq!(wq(&a, plain), "foo");
        assert_eq!(wq(&a, odd), "'hello world'");
        assert_eq!(rendered(&a, odd, &WriteOptions::plain()), "hello world");
    }

    #[test]
    fn quoting_is_a_noop_on_safe_atoms() {
        let mut a = arena();
        let t = a.atom("safe_atom");
        assert_eq!(
            rendered(&a, t, &WriteOptions::plain()),
            rendered(&a, t, &WriteOptions::quoted())
        );
    }

    #[test]
    fn integers_and_bigs() {
        let mut a = arena();
        let f = a.func("f", &[Term::int(1), Term::int(-1)]);
        assert_eq!(wq(&a, f), "f(1,-1)");

        let big = a.big("123456789012345678901234567890").unwrap();
        assert_eq!(wq(&a, big), "123456789012345678901234567890");
    }

    #[test]
    fn floats() {
        let mut a = arena();
        let f = a.func("f", &[Term::real(3.14), Term::real(-0.5)]);
        assert_eq!(wq(&a, f), "f(3.14,-0.5)");
        assert_eq!(wq(&a, Term::real(1.0)), "1.0");
    }

    #[test]
    fn prefix_sign_keeps_tokens_apart() {
        let mut a = arena();
        let neg1 = a.func("-", &[Term::int(1)]);
        assert_eq!(wq(&a, neg1), "- 1");
        // ... while the literal stays glued:
        assert_eq!(wq(&a, Term::int(-1)), "-1");

        let x = a.atom("x");
        let neg_atom = a.func("-", &[x]);
        assert_eq!(wq(&a, neg_atom), "-x");

        let nested = {
            let inner = a.func("-", &[Term::int(1)]);
            a.func("-", &[inner])
        };
        assert_eq!(wq(&a, nested), "- - 1");
    }

    #[test]
    fn negative_literal_operands_are_bracketed() {
        let mut a = arena();
        let pow = a.func("^", &[Term::int(-1), Term::int(2)]);
        assert_eq!(wq(&a, pow), "(-1)^2");

        let x = a.atom("x");
        let sub = a.func("-", &[x, Term::int(-1)]);
        assert_eq!(wq(&a, sub), "x- (-1)");
    }

    #[test]
    fn precedence_parenthesization() {
        let mut a = arena();
        let (x, y, z) = (a.atom("a"), a.atom("b"), a.atom("c"));

        let sum = a.func("+", &[x, y]);
        let prod = a.func("*", &[sum, z]);
        assert_eq!(wq(&a, prod), "(a+b)*c");

        let prod = a.func("*", &[y, z]);
        let sum = a.func("+", &[x, prod]);
        assert_eq!(wq(&a, sum), "a+b*c");
    }

    #[test]
    fn associativity_chains() {
        let mut a = arena();
        let left = {
            let inner = a.func("-", &[Term::int(1), Term::int(2)]);
            a.func("-", &[inner, Term::int(3)])
        };
        assert_eq!(wq(&a, left), "1-2-3");

        let right = {
            let inner = a.func("-", &[Term::int(2), Term::int(3)]);
            a.func("-", &[Term::int(1), inner])
        };
        // The wrap-paren goes through the boundary guard, hence the space.
        assert_eq!(wq(&a, right), "1- (2-3)");
    }

    #[test]
    fn comma_operator() {
        let mut a = arena();
        let (x, y) = (a.atom("a"), a.atom("b"));
        let conj = a.func(",", &[x, y]);
        assert_eq!(wq(&a, conj), "a,b");

        let wrapped = a.func("f", &[conj]);
        assert_eq!(wq(&a, wrapped), "f((a,b))");

        let low = WriteOptions {
            priority: ARG_PREC,
            ..WriteOptions::quoted()
        };
        assert_eq!(rendered(&a, conj, &low), "(a,b)");
    }

    #[test]
    fn alpha_operators_get_spaces_from_the_guard() {
        let mut a = arena();
        let (x, y) = (a.atom("a"), a.atom("b"));
        let t = a.func("mod", &[x, y]);
        assert_eq!(wq(&a, t), "a mod b");

        let t = a.func("\\+", &[x]);
        assert_eq!(wq(&a, t), "\\+a");
    }

    #[test]
    fn operator_atoms_as_operands_are_bracketed() {
        let mut a = arena();
        let x = a.atom("a");
        let minus = a.atom("-");
        let t = a.func("=", &[x, minus]);
        assert_eq!(wq(&a, t), "a= (-)");

        // Canonical argument position needs no brackets.
        let t = a.func("f", &[minus]);
        assert_eq!(wq(&a, t), "f(-)");
    }

    #[test]
    fn ignore_ops_prints_canonically() {
        let mut a = arena();
        let t = a.func("+", &[Term::int(1), Term::int(2)]);
        let opts = WriteOptions {
            ignore_ops: true,
            ..WriteOptions::quoted()
        };
        assert_eq!(rendered(&a, t, &opts), "+(1,2)");
        assert_eq!(rendered(&a, t, &WriteOptions::canonical()), "+(1,2)");

        let neg = a.func("-", &[Term::int(1)]);
        assert_eq!(rendered(&a, neg, &opts), "-(1)");
    }

    #[test]
    fn postfix_operators() {
        let mut a = arena();
        a.opers_mut()
            .define("++", Fixity::Postfix, 100, Assoc::Left)
            .unwrap();
        let x = a.atom("x");
        let t = a.func("++", &[x]);
        assert_eq!(wq(&a, t), "x++");
    }

    #[test]
    fn lists() {
        let mut a = arena();
        let t = a.list([Term::int(1), Term::int(2), Term::int(3)]);
        assert_eq!(wq(&a, t), "[1,2,3]");

        let empty = a.nil();
        assert_eq!(wq(&a, empty), "[]");

        let x = a.var();
        let t = a.list_with_tail([Term::int(1)], x);
        assert_eq!(wq(&a, t), "[1|_0]");

        let inner = a.list([Term::int(1)]);
        let t = a.list([inner]);
        assert_eq!(wq(&a, t), "[[1]]");
    }

    #[test]
    fn curly_terms() {
        let mut a = arena();
        let x = a.atom("a");
        let t = a.curly(x);
        assert_eq!(wq(&a, t), "{a}");

        let y = a.atom("b");
        let conj = a.func(",", &[x, y]);
        let t = a.curly(conj);
        assert_eq!(wq(&a, t), "{a,b}");
    }

    #[test]
    fn next_argument_spacing() {
        let mut a = arena();
        let (x, y) = (a.atom("a"), a.atom("b"));
        let f = a.func("f", &[x, y]);
        let l = a.list([Term::int(1), Term::int(2)]);
        let opts = WriteOptions {
            spacing: Spacing::NextArgument,
            ..WriteOptions::quoted()
        };
        assert_eq!(rendered(&a, f, &opts), "f(a, b)");
        assert_eq!(rendered(&a, l, &opts), "[1, 2]");
    }

    #[test]
    fn strings() {
        let mut a = arena();
        let s = a.str("it's");
        assert_eq!(wq(&a, s), "\"it's\"");
        assert_eq!(rendered(&a, s, &WriteOptions::plain()), "it's");

        let opts = WriteOptions {
            backquoted_string: true,
            ..WriteOptions::quoted()
        };
        assert_eq!(rendered(&a, s, &opts), "`it's`");

        let s = a.str("say \"hi\"");
        assert_eq!(wq(&a, s), "\"say \\\"hi\\\"\"");
    }

    #[test]
    fn blobs_render_as_hex() {
        let mut a = arena();
        let b = a.bin(&[0x0A, 0xFF]);
        assert_eq!(wq(&a, b), "hex{0AFF}");
    }

    #[test]
    fn variables_use_identity_names() {
        let mut a = arena();
        let x = a.var();
        let y = a.var();
        let t = a.func("f", &[x, y, x]);
        assert_eq!(wq(&a, t), "f(_0,_1,_0)");
    }

    #[test]
    fn numbervars() {
        let mut a = arena();
        let t = a.func("$VAR", &[Term::int(0)]);
        assert_eq!(wq(&a, t), "A");
        let t = a.func("$VAR", &[Term::int(25)]);
        assert_eq!(wq(&a, t), "Z");
        let t = a.func("$VAR", &[Term::int(26)]);
        assert_eq!(wq(&a, t), "A1");

        // With numbervars off the convention is not applied.
        let t = a.func("$VAR", &[Term::int(0)]);
        let opts = WriteOptions {
            numbervars: false,
            ..WriteOptions::quoted()
        };
        assert_eq!(rendered(&a, t, &opts), "'$VAR'(0)");
    }

    #[test]
    fn attvar_modes() {
        let mut a = arena();
        let frozen = a.atom("frozen");
        let v = a.attvar(&[frozen]);

        assert_eq!(wq(&a, v), "_D0");

        let opts = WriteOptions::quoted().with_attributes(AttributeMode::Dots);
        assert_eq!(rendered(&a, v, &opts), "_D0{...}");

        let opts = WriteOptions::quoted().with_attributes(AttributeMode::Write);
        assert_eq!(rendered(&a, v, &opts), "_D0{frozen}");
    }

    #[test]
    fn shared_attvar_prints_attributes_once() {
        let mut a = arena();
        let frozen = a.atom("frozen");
        let queued = a.atom("queued");
        let v = a.attvar(&[frozen, queued]);
        let t = a.func("f", &[v, v]);

        let opts = WriteOptions::quoted().with_attributes(AttributeMode::Write);
        assert_eq!(rendered(&a, t, &opts), "f(_D0{frozen,queued},_D0)");
    }

    #[test]
    fn depth_limit_on_compounds() {
        let mut a = arena();
        let mut t = a.atom("x");
        for _ in 0..5 {
            t = a.func("f", &[t]);
        }
        let opts = WriteOptions::quoted().with_max_depth(2);
        assert_eq!(rendered(&a, t, &opts), "f(f(...))");
    }

    #[test]
    fn depth_limit_on_lists() {
        let mut a = arena();
        let t = a.list((1..=5).map(Term::int));
        let opts = WriteOptions::quoted().with_max_depth(3);
        assert_eq!(rendered(&a, t, &opts), "[1,2|...]");

        let opts = WriteOptions::quoted().with_max_depth(1);
        assert_eq!(rendered(&a, t, &opts), "[...]");
    }

    struct Redactor;

    impl Portray for Redactor {
        fn portray(
            &self,
            arena: &Arena,
            term: Term,
            sink: &mut dyn Sink,
        ) -> Result<bool, WriteError> {
            if arena.atom_name(term).is_ok_and(|n| n == "secret") {
                sink.put_str("<<redacted>>")?;
                return Ok(true);
            }
            Ok(false)
        }
    }

    #[test]
    fn portray_hook_replaces_subterms() {
        let mut a = arena();
        let secret = a.atom("secret");
        let public = a.atom("public");
        let t = a.func("pair", &[secret, public]);

        let mut out = String::new();
        print(&a, t, &Redactor, &mut out).unwrap();
        assert_eq!(out, "pair(<<redacted>>,public)");
    }

    #[test]
    fn partial_writes_share_boundary_state() {
        let mut a = arena();
        let x = a.atom("a");
        let y = a.atom("b");
        let opts = WriteOptions {
            partial: true,
            ..WriteOptions::quoted()
        };

        let mut out = String::new();
        let mut writer = Writer::new(&a, &mut out);
        writer.write_term(x, &opts).unwrap();
        writer.write_term(y, &opts).unwrap();
        assert_eq!(out, "a b");

        let mut out = String::new();
        let mut writer = Writer::new(&a, &mut out);
        writer.write_term(x, &WriteOptions::quoted()).unwrap();
        writer.write_term(y, &WriteOptions::quoted()).unwrap();
        assert_eq!(out, "ab");
    }

    #[test]
    fn writeln_terminates_the_line() {
        let mut a = arena();
        let t = a.atom("done");
        let mut out = String::new();
        writeln(&a, t, &mut out).unwrap();
        assert_eq!(out, "done\n");
    }

    #[test]
    fn invalid_priority_is_rejected_before_output() {
        let mut a = arena();
        let t = a.atom("x");
        let opts = WriteOptions {
            priority: 5000,
            ..WriteOptions::quoted()
        };
        let mut out = String::new();
        let err = write_term(&a, t, &opts, &mut out).unwrap_err();
        assert!(matches!(err, WriteError::InvalidOption(_)));
        assert!(out.is_empty());
    }

    #[test]
    fn escapes_disabled_faults_on_control_characters() {
        let mut a = arena();
        let t = a.atom("a\nb");
        let opts = WriteOptions {
            char_escapes: false,
            ..WriteOptions::quoted()
        };
        assert!(matches!(
            term_to_string(&a, t, &opts),
            Err(WriteError::Unrepresentable { .. })
        ));
        // With escapes on the same atom renders fine.
        assert_eq!(wq(&a, t), "'a\\nb'");
    }

    struct FailingSink {
        remaining: usize,
    }

    impl Sink for FailingSink {
        fn put_char(&mut self, _c: char) -> Result<(), SinkError> {
            if self.remaining == 0 {
                return Err(SinkError::Closed);
            }
            self.remaining -= 1;
            Ok(())
        }
    }

    #[test]
    fn sink_failure_aborts_immediately() {
        let mut a = arena();
        let x = a.atom("x");
        let t = a.func("f", &[x]);
        let t2 = a.atom("abcdef");
        let t = a.func("g", &[t, t2]);
        let mut sink = FailingSink { remaining: 3 };
        let err = writeq(&a, t, &mut sink).unwrap_err();
        assert!(matches!(err, WriteError::Sink(SinkError::Closed)));
    }

    #[test]
    fn clause_shape_round_trips() {
        let mut a = arena();
        let (h, b1, b2) = (a.atom("head"), a.atom("one"), a.atom("two"));
        let body = a.func(",", &[b1, b2]);
        let clause = a.func(":-", &[h, body]);
        assert_eq!(wq(&a, clause), "head:-one,two");

        let directive = a.func(":-", &[b1]);
        assert_eq!(wq(&a, directive), ":-one");
    }
}
