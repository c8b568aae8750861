//! File-system natives.
//!
//! Every handle is opened and closed within the native call; nothing is
//! held across the call boundary. Existence and deletion report success as
//! booleans; `fileSize` on a missing path returns nil; read and write
//! failures raise runtime errors naming the path.

use std::{fs, io::Write as _};

use crate::{
    error::{RunResult, RuntimeError},
    intern::Interns,
    value::Value,
};

/// Reads a whole file as a string. The path argument is trimmed of
/// surrounding whitespace and quote characters before use.
pub(super) fn read_file(args: &[Value], interns: &mut Interns) -> RunResult<Value> {
    let Some(id) = args[0].as_str() else {
        return Err(RuntimeError::native("readFile() takes one string argument (path)."));
    };
    let path = trim_path(interns.get(id)).to_owned();
    match fs::read_to_string(&path) {
        Ok(content) => Ok(Value::Str(interns.take(content))),
        Err(_) => Err(RuntimeError::native(format!("Could not read file \"{path}\"."))),
    }
}

pub(super) fn write_file(args: &[Value], interns: &Interns) -> RunResult<Value> {
    let (path, content) = two_string_args(args, interns, "writeFile() takes two string arguments (path, content).")?;
    if fs::write(path, content).is_err() {
        return Err(RuntimeError::native(format!(
            "Could not open file \"{path}\" for writing."
        )));
    }
    Ok(Value::Nil)
}

pub(super) fn append_file(args: &[Value], interns: &Interns) -> RunResult<Value> {
    let (path, content) = two_string_args(args, interns, "appendFile() takes two string arguments (path, content).")?;
    let appended = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .and_then(|mut file| file.write_all(content.as_bytes()));
    if appended.is_err() {
        return Err(RuntimeError::native(format!(
            "Could not open file \"{path}\" for appending."
        )));
    }
    Ok(Value::Nil)
}

pub(super) fn file_exists(args: &[Value], interns: &Interns) -> RunResult<Value> {
    let path = path_arg(args, interns, "fileExists() takes one string argument (path).")?;
    Ok(Value::Bool(fs::metadata(path).is_ok()))
}

pub(super) fn delete_file(args: &[Value], interns: &Interns) -> RunResult<Value> {
    let path = path_arg(args, interns, "deleteFile() takes one string argument (path).")?;
    Ok(Value::Bool(fs::remove_file(path).is_ok()))
}

pub(super) fn file_size(args: &[Value], interns: &Interns) -> RunResult<Value> {
    let path = path_arg(args, interns, "fileSize() takes one string argument (path).")?;
    match fs::metadata(path) {
        Ok(meta) => Ok(Value::Number(meta.len() as f64)),
        Err(_) => Ok(Value::Nil),
    }
}

pub(super) fn is_dir(args: &[Value], interns: &Interns) -> RunResult<Value> {
    let path = path_arg(args, interns, "isDir() takes one string argument (path).")?;
    Ok(Value::Bool(fs::metadata(path).is_ok_and(|meta| meta.is_dir())))
}

pub(super) fn is_file(args: &[Value], interns: &Interns) -> RunResult<Value> {
    let path = path_arg(args, interns, "isFile() expects one string argument.")?;
    Ok(Value::Bool(fs::metadata(path).is_ok_and(|meta| meta.is_file())))
}

pub(super) fn create_dir(args: &[Value], interns: &Interns) -> RunResult<Value> {
    let path = path_arg(args, interns, "createDir() expects one string argument (path).")?;
    Ok(Value::Bool(fs::create_dir(path).is_ok()))
}

/// Extracts the single string argument, or fails with `message`.
fn path_arg<'a>(args: &[Value], interns: &'a Interns, message: &'static str) -> RunResult<&'a str> {
    match args[0].as_str() {
        Some(id) => Ok(interns.get(id)),
        None => Err(RuntimeError::native(message)),
    }
}

/// Extracts two string arguments, or fails with `message`.
fn two_string_args<'a>(
    args: &[Value],
    interns: &'a Interns,
    message: &'static str,
) -> RunResult<(&'a str, &'a str)> {
    match (args[0].as_str(), args[1].as_str()) {
        (Some(a), Some(b)) => Ok((interns.get(a), interns.get(b))),
        _ => Err(RuntimeError::native(message)),
    }
}

/// Strips surrounding whitespace and quote characters from a path.
fn trim_path(path: &str) -> &str {
    path.trim_matches(|c: char| c.is_whitespace() || c == '\'' || c == '"')
}
