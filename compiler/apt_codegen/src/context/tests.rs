use pretty_assertions::assert_eq;

use super::CodegenContext;

#[test]
fn fresh_temps_are_distinct() {
    let mut ctx = CodegenContext::new();
    assert_eq!(ctx.fresh_temp(), "_t0");
    assert_eq!(ctx.fresh_temp(), "_t1");
    assert_eq!(ctx.fresh_temp(), "_t2");
}

#[test]
fn indent_dedent() {
    let mut ctx = CodegenContext::new();

    ctx.writeln("line1");
    ctx.indent();
    ctx.writeln("line2");
    ctx.indent();
    ctx.writeln("line3");
    ctx.dedent();
    ctx.writeln("line4");
    ctx.dedent();
    ctx.writeln("line5");

    assert_eq!(
        ctx.output(),
        "line1\n    line2\n        line3\n    line4\nline5\n"
    );
    assert_eq!(ctx.depth(), 0);
}

#[test]
fn write_does_not_indent() {
    let mut ctx = CodegenContext::new();
    ctx.indent();
    ctx.write_indent();
    ctx.write("a");
    ctx.write("b");
    ctx.newline();
    assert_eq!(ctx.output(), "    ab\n");
}

#[test]
fn take_output_clears_buffer() {
    let mut ctx = CodegenContext::new();
    ctx.writeln("x");
    assert_eq!(ctx.take_output(), "x\n");
    assert_eq!(ctx.output(), "");
}

#[test]
fn nested_buffer_is_merged_one_level_deeper() {
    let mut ctx = CodegenContext::new();
    ctx.writeln("{");
    let mut inner = ctx.nested();
    inner.writeln("body();");
    assert_eq!(ctx.output(), "{\n");

    ctx.absorb(inner);
    ctx.writeln("}");
    assert_eq!(ctx.output(), "{\n    body();\n}\n");
}

#[test]
fn dropped_nested_buffer_leaves_no_trace() {
    let ctx = CodegenContext::new();
    let mut inner = ctx.nested();
    inner.writeln("discarded();");
    drop(inner);
    assert_eq!(ctx.output(), "");
    assert_eq!(ctx.depth(), 0);
}
